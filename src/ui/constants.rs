pub(crate) const APP_TITLE: &str = "SSH connections";
pub(crate) const HELP_TEXT: &str =
    "(n)ew | (d)elete | Enter/Space connect | Home hide data | j/k move | (q)uit";
pub(crate) const EMPTY_LIST_TEXT: &str = "No saved connections, press n to add one";

pub(crate) const LABEL_WIDTH: usize = 10;

pub(crate) const HEADER_HEIGHT: u16 = 3;
pub(crate) const FOOTER_HEIGHT: u16 = 5;

pub(crate) const MODAL_WIDTH_PERCENT: u16 = 70;
pub(crate) const MODAL_MIN_WIDTH: u16 = 30;

pub(crate) const PICKER_WIDTH: u16 = 80;
pub(crate) const PICKER_HEIGHT: u16 = 90;
pub(crate) const PICKER_FOOTER_HEIGHT: u16 = 2;
pub(crate) const PICKER_ERROR_HEIGHT: u16 = 1;

pub(crate) const POPUP_MIN_WIDTH: u16 = 10;
pub(crate) const POPUP_MIN_HEIGHT: u16 = 5;

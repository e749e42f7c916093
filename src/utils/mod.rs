// Utils compartidos

pub mod constants;
pub mod geo;
pub mod i18n;
pub mod storage;

mod predict_api;
pub mod support;

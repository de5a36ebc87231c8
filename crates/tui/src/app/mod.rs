mod input;
mod modal;
mod state;
mod util;

pub(crate) use state::{
  App,
  ModalState,
  ReportField
};

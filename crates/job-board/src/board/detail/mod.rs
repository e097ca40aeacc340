//! Single-job page: fetch orchestration, hiring-status toggle, apply, and the
//! per-viewer page view.

mod controller;
mod view;

pub use controller::{DetailError, JobDetailController};
pub use view::{
    ApplicantPanel, ApplyAction, HiringStatusControl, JobDetailView, JobPage, NOT_FOUND_MESSAGE,
};

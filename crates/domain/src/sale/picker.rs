//! Initial status selection for new sales.

use rand::Rng;

use crate::SaleStatus;

/// Decides the status a newly created sale starts in.
///
/// Settlement happens outside this service, so the outcome is known at
/// intake time and never supplied by the client.
pub trait StatusPicker: Send + Sync {
    fn pick(&self) -> SaleStatus;
}

impl<F> StatusPicker for F
where
    F: Fn() -> SaleStatus + Send + Sync,
{
    fn pick(&self) -> SaleStatus {
        self()
    }
}

/// Draws uniformly from every status.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStatusPicker;

impl StatusPicker for RandomStatusPicker {
    fn pick(&self) -> SaleStatus {
        let index = rand::thread_rng().gen_range(0..SaleStatus::ALL.len());
        SaleStatus::ALL[index]
    }
}

/// Always picks the same status.
#[derive(Debug, Clone, Copy)]
pub struct FixedStatusPicker(pub SaleStatus);

impl StatusPicker for FixedStatusPicker {
    fn pick(&self) -> SaleStatus {
        self.0
    }
}

pub use super::factories::{PartialRecordFactory, PlanFactory, RowFactory};

pub struct Factory;

impl Factory {
    pub fn plan() -> PlanFactory {
        PlanFactory::new()
    }

    pub fn rows() -> RowFactory {
        RowFactory::new()
    }

    pub fn partial_record() -> PartialRecordFactory {
        PartialRecordFactory::new()
    }
}

pub mod partial_record_factory;
pub mod plan_factory;
pub mod row_factory;

pub use partial_record_factory::PartialRecordFactory;
pub use plan_factory::PlanFactory;
pub use row_factory::RowFactory;

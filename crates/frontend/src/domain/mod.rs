pub mod a001_work_order;
pub mod a002_process_step;
pub mod a003_quantity_template;

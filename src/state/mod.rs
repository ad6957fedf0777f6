//! Field configuration state

mod catalog_selector;
mod data_flags;
pub mod defaults;
mod fields;
mod fields_manager;
mod forms;
mod mode;
mod option_list;
mod record;
mod selection_set;

pub use catalog_selector::*;
pub use data_flags::*;
pub use fields::*;
pub use fields_manager::*;
pub use forms::*;
pub use mode::*;
pub use option_list::*;
pub use record::*;
pub use selection_set::*;

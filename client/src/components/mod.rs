//! Text renderings of client state

pub mod build_status_modal;
pub mod project_item;
pub mod project_list;
pub mod project_view;
pub mod sidebar;

/// Layout variant shared by list components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Full,
    Compact,
}

pub mod journal_panel;
pub mod palette;
pub mod pointer_adapter;
pub mod timeline_editor;
pub mod timeline_view;

pub mod borrow_media_cmd;
pub mod current_borrower_cmd;
pub mod list_overdue_cmd;
pub mod return_media_cmd;

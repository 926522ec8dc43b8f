pub mod higgsfield;

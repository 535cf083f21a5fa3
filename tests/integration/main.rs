//! Integration tests for rewindtty

mod helpers;

mod bookmarks_test;
mod cli_test;
mod engine_test;
mod recording_test;
mod upload_test;

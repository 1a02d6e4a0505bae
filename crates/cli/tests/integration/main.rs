mod common;
mod filter_tests;
mod update_tests;
mod verify_tests;

pub mod memory_mock;

pub mod call_writer;

pub mod signable_message;

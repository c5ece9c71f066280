//! Logging infrastructure: structured exchange logging.
//!
//! Provides [`JsonlExchangeLogger`], a JSONL file writer that implements
//! the [`ExchangeLogger`](huddle_application::ExchangeLogger) port.

mod jsonl_exchange_logger;

pub use jsonl_exchange_logger::JsonlExchangeLogger;

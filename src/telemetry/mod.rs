pub mod http;
pub mod subscriber;

pub use http::{REQUEST_ID_HEADER, RequestContext, TRACE_ID_HEADER, request_logging_middleware};
pub use subscriber::init_tracing;

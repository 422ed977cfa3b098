pub mod err;
pub mod trace;

#[doc(inline)]
pub use trace::initialize_logger;
#[cfg(feature = "tracing")]
#[doc(inline)]
pub use trace::initialize_tracer;

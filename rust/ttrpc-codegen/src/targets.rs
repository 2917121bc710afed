//! Language targets. Only Go is generated today.

pub mod go;

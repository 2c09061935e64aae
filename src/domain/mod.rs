// Domain layer: read-only views of Textract responses and the ports the engine talks through.

pub mod model;
pub mod ports;

pub mod onnx_embedding_provider;
pub mod whitelist_loader;

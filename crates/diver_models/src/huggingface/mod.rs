//! HuggingFace Inference API integration.

mod client;
mod dto;

pub use client::{HUGGINGFACE_BASE_URL, HUGGINGFACE_DEFAULT_MODELS, HuggingFaceClient};
pub use dto::{
    HuggingFaceGeneration, HuggingFaceParameters, HuggingFaceParametersBuilder,
    HuggingFaceRequest, HuggingFaceRequestBuilder, HuggingFaceResponse,
};

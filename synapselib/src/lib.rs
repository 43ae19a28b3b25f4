pub mod error;
pub mod activations;
pub mod neuron;
pub mod layer;
pub mod network;
pub mod trainer;

pub mod prelude {
    pub use super::error::{Error, Result};

    pub use super::activations::*;
    pub use super::neuron::Neuron;
    pub use super::layer::Layer;
    pub use super::network::{Network, Topology};
    pub use super::trainer::{Sample, Trainer, DEFAULT_LEARN_RATE, GRADIENT_CLIP_THRESHOLD};
}

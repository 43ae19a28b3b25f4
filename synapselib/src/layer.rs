use crate::prelude::*;

#[derive(Debug, Clone, PartialEq)]
/// Group of neurons sharing the same fan-in.
///
/// All neurons of a layer read the same input vector during a
/// forward pass and there is no dependency between them, so their
/// in-layer order only matters for output indexing.
pub struct Layer {
    pub neurons: Vec<Neuron>
}

impl Layer {
    /// Build a layer of `size` neurons with `fan_in` weights each.
    ///
    /// One scale value is drawn from `he_scale` for the whole layer
    /// and replicated across every weight of every neuron, so a fresh
    /// layer is symmetric: all its neurons compute the same function
    /// until training diverges them through per-input differences.
    /// Every neuron still owns an independent weight vector. Biases
    /// start at zero.
    pub fn init(size: usize, fan_in: usize, rng: &mut fastrand::Rng) -> Self {
        let scale = he_scale(rng, fan_in);

        Self {
            neurons: vec![Neuron::init(fan_in, scale); size]
        }
    }

    #[inline]
    /// Amount of neurons in the layer.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Run every neuron of the layer over the same input vector,
    /// storing each neuron's activated output.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<()> {
        for neuron in &mut self.neurons {
            neuron.predict(inputs)?;
        }

        Ok(())
    }

    /// Vector of the activated outputs stored by the last forward
    /// pass, in neuron order.
    pub fn predictions(&self) -> Vec<f64> {
        self.neurons.iter()
            .map(|neuron| neuron.predicted)
            .collect()
    }
}

#[test]
fn test_layer_shared_scale() {
    let mut rng = fastrand::Rng::with_seed(42);

    let layer = Layer::init(4, 3, &mut rng);

    assert_eq!(layer.len(), 4);

    let scale = layer.neurons[0].weights[0];

    for neuron in &layer.neurons {
        assert_eq!(neuron.weights.len(), 3);
        assert_eq!(neuron.bias, 0.0);

        for weight in &neuron.weights {
            assert_eq!(*weight, scale);
        }
    }
}

#[test]
/// Neurons initialized from one scale must not share storage.
fn test_layer_neurons_independent() {
    let mut rng = fastrand::Rng::with_seed(42);

    let mut layer = Layer::init(2, 2, &mut rng);

    let scale = layer.neurons[1].weights[0];

    layer.neurons[0].weights[0] += 1.0;

    assert_eq!(layer.neurons[1].weights[0], scale);
    assert_ne!(layer.neurons[0].weights[0], layer.neurons[1].weights[0]);
}

#[test]
fn test_layer_forward() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let mut layer = Layer::init(3, 2, &mut rng);

    layer.forward(&[1.0, -1.0])?;

    let predictions = layer.predictions();

    assert_eq!(predictions.len(), 3);

    // Symmetric initial weights, symmetric outputs.
    assert_eq!(predictions[0], predictions[1]);
    assert_eq!(predictions[1], predictions[2]);

    Ok(())
}

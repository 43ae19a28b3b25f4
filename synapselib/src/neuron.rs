use crate::prelude::*;

#[derive(Debug, Clone, PartialEq)]
/// Single neuron representation.
///
/// A neuron keeps one weight per output of the preceding layer
/// (or per raw network input for the first layer), a bias, and
/// the activated value computed by its last `predict` call. The
/// stored value is read back both as this neuron's output and,
/// collected across a layer, as the input vector of the next one.
///
/// ```
/// use synapselib::prelude::*;
///
/// let mut neuron = Neuron::init(2, 0.5);
///
/// // swish(1.0 * 0.5 + 1.0 * 0.5 + 0.0)
/// let output = neuron.predict(&[1.0, 1.0]).unwrap();
///
/// assert_eq!(output, neuron.predicted);
/// assert!((output - 0.731058).abs() < 1e-6);
/// ```
pub struct Neuron {
    /// Weights for the neuron inputs.
    pub weights: Vec<f64>,

    /// Value added to the weighted input sum.
    pub bias: f64,

    /// Activated output stored by the last `predict` call.
    pub predicted: f64
}

impl Neuron {
    /// Construct new neuron with `fan_in` weights, all set to the
    /// same `scale` value, and zero bias.
    pub fn init(fan_in: usize, scale: f64) -> Self {
        Self {
            weights: vec![scale; fan_in],
            bias: 0.0,
            predicted: 0.0
        }
    }

    /// Calculate `swish(dot(inputs, weights) + bias)`, store it as
    /// the neuron's predicted value and return it.
    ///
    /// Fails with `Error::DimensionMismatch` before touching any
    /// state when the input length differs from the weight count.
    pub fn predict(&mut self, inputs: &[f64]) -> Result<f64> {
        if inputs.len() != self.weights.len() {
            return Err(Error::DimensionMismatch {
                expected: self.weights.len(),
                actual: inputs.len()
            });
        }

        let mut sum = 0.0;

        for (input, weight) in inputs.iter().zip(&self.weights) {
            sum += input * weight;
        }

        self.predicted = swish(sum + self.bias);

        Ok(self.predicted)
    }
}

#[test]
fn test_neuron_predict() -> Result<()> {
    let mut neuron = Neuron::init(3, 0.25);

    neuron.bias = 0.5;

    // swish(1.0 * 0.25 + 2.0 * 0.25 + 4.0 * 0.25 + 0.5) = swish(2.25)
    let output = neuron.predict(&[1.0, 2.0, 4.0])?;

    assert!((output - swish(2.25)).abs() < 1e-12);
    assert_eq!(output, neuron.predicted);

    Ok(())
}

#[test]
fn test_neuron_dimension_mismatch() {
    let mut neuron = Neuron::init(2, 0.1);

    neuron.predict(&[1.0, 1.0]).unwrap();

    let stored = neuron.predicted;

    assert_eq!(
        neuron.predict(&[1.0, 1.0, 1.0]),
        Err(Error::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );

    // Failed call leaves the previous activation intact.
    assert_eq!(neuron.predicted, stored);
}

use crate::prelude::*;

/// Learn rate used when none is configured.
pub const DEFAULT_LEARN_RATE: f64 = 0.03;

/// Symmetric bound applied to the scaled gradient step to prevent
/// gradient explosion.
pub const GRADIENT_CLIP_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
/// One labeled training example.
///
/// Input length must equal the network's input count, target length
/// the output layer's neuron count.
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>
}

impl Sample {
    #[inline]
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Self {
        Self {
            input,
            target
        }
    }
}

#[derive(Debug, Clone)]
/// Training engine owning one network.
///
/// Drives forward passes layer by layer, then walks the layers in
/// reverse applying clipped gradient descent updates. The network is
/// exclusively owned: one trainer, one network, single-threaded.
///
/// ```
/// use synapselib::prelude::*;
///
/// let mut rng = fastrand::Rng::with_seed(42);
///
/// let network = Network::new(&Topology::new(2, vec![], 2), &mut rng).unwrap();
///
/// let mut trainer = Trainer::new(network);
///
/// let samples = [
///     Sample::new(vec![1.0, 0.0], vec![1.0, 0.0]),
///     Sample::new(vec![0.0, 1.0], vec![0.0, 1.0])
/// ];
///
/// trainer.train(&samples, 500).unwrap();
///
/// let output = trainer.output(&[1.0, 0.0]).unwrap();
///
/// assert!(output[0] > output[1]);
/// ```
pub struct Trainer {
    network: Network,
    learn_rate: f64
}

impl Trainer {
    #[inline]
    /// Wrap a built network with the default learn rate.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            learn_rate: DEFAULT_LEARN_RATE
        }
    }

    #[inline]
    /// Change the learn rate of the trainer.
    pub fn with_learn_rate(mut self, learn_rate: f64) -> Self {
        self.learn_rate = learn_rate;

        self
    }

    #[inline]
    /// Return the owned network.
    pub const fn network(&self) -> &Network {
        &self.network
    }

    #[inline]
    pub const fn learn_rate(&self) -> f64 {
        self.learn_rate
    }

    /// Run one forward pass: the first hidden layer predicts from the
    /// input vector, each following hidden layer from the predictions
    /// of the previous one, the output layer from the predictions of
    /// the last hidden layer. Without hidden layers the output layer
    /// predicts straight from the input vector.
    fn forward(&mut self, input: &[f64]) -> Result<()> {
        if self.network.hidden.is_empty() {
            return self.network.output.forward(input);
        }

        self.network.hidden[0].forward(input)?;

        for i in 1..self.network.hidden.len() {
            let predictions = self.network.hidden[i - 1].predictions();

            self.network.hidden[i].forward(&predictions)?;
        }

        let predictions = self.network.hidden[self.network.hidden.len() - 1].predictions();

        self.network.output.forward(&predictions)
    }

    /// Apply one clipped gradient descent step to a single neuron,
    /// given the outputs of the preceding layer (or the raw input
    /// vector for the first layer).
    fn update(neuron: &mut Neuron, preceding: &[f64], gradient: f64, learn_rate: f64) {
        let mut step = learn_rate * gradient;

        // The clip bounds the scaled gradient, not the raw one.
        if step.abs() > GRADIENT_CLIP_THRESHOLD {
            step = if step > 0.0 {
                GRADIENT_CLIP_THRESHOLD
            } else {
                -GRADIENT_CLIP_THRESHOLD
            };
        }

        for (weight, preceding) in neuron.weights.iter_mut().zip(preceding) {
            *weight -= step * preceding;
        }

        neuron.bias -= step;
    }

    /// Score every neuron of a layer against its target value and
    /// update it.
    ///
    /// Fails with `Error::InvalidTrainingConfiguration` when the
    /// target length differs from the layer's neuron count.
    fn backward_layer(layer: &mut Layer, preceding: &[f64], target: &[f64], learn_rate: f64) -> Result<()> {
        if target.len() != layer.len() {
            return Err(Error::InvalidTrainingConfiguration(format!(
                "target of length {} scored against a layer of {} neurons",
                target.len(),
                layer.len()
            )));
        }

        for (neuron, target) in layer.neurons.iter_mut().zip(target) {
            let gradient = (neuron.predicted - target) * swish_derivative(neuron.predicted);

            Self::update(neuron, preceding, gradient, learn_rate);
        }

        Ok(())
    }

    /// Run one backward pass for the sample the last forward pass
    /// was computed on.
    ///
    /// Every layer it touches is scored directly against the sample's
    /// target vector: the output layer first, then the hidden layers
    /// from the second-to-last one down to, but excluding, the first,
    /// then the first hidden layer from the raw input vector. A
    /// network with two or more hidden layers never updates its last
    /// hidden layer.
    fn backward(&mut self, sample: &Sample) -> Result<()> {
        if self.network.hidden.is_empty() {
            return Self::backward_layer(&mut self.network.output, &sample.input, &sample.target, self.learn_rate);
        }

        let last = self.network.hidden.len() - 1;

        let predictions = self.network.hidden[last].predictions();

        Self::backward_layer(&mut self.network.output, &predictions, &sample.target, self.learn_rate)?;

        for i in (1..last).rev() {
            let predictions = self.network.hidden[i - 1].predictions();

            Self::backward_layer(&mut self.network.hidden[i], &predictions, &sample.target, self.learn_rate)?;
        }

        Self::backward_layer(&mut self.network.hidden[0], &sample.input, &sample.target, self.learn_rate)
    }

    /// Train the network on the given samples for the given amount
    /// of epochs.
    ///
    /// Samples are visited in the order they are given, every epoch:
    /// no shuffling, no early stopping, no convergence check.
    pub fn train(&mut self, samples: &[Sample], epochs: usize) -> Result<()> {
        for _ in 0..epochs {
            for sample in samples {
                self.forward(&sample.input)?;
                self.backward(sample)?;
            }
        }

        Ok(())
    }

    /// Run one forward pass and return the output layer's predicted
    /// values.
    ///
    /// Safe to call at any time: an untrained network simply answers
    /// from its initial weights.
    pub fn output(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.forward(input)?;

        Ok(self.network.output.predictions())
    }
}

#[test]
/// Zero input through zero biases is exactly `swish(0) = 0`.
fn test_untrained_zero_input() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(3, vec![], 1), &mut rng)?;

    let mut trainer = Trainer::new(network);

    assert_eq!(trainer.output(&[0.0, 0.0, 0.0])?, vec![0.0]);

    Ok(())
}

#[test]
fn test_output_idempotent() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(2, vec![3], 2), &mut rng)?;

    let mut trainer = Trainer::new(network);

    let first = trainer.output(&[0.3, -0.7])?;
    let second = trainer.output(&[0.3, -0.7])?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_input_dimension_mismatch() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(2, vec![], 1), &mut rng)?;

    let mut trainer = Trainer::new(network);

    assert!(matches!(
        trainer.output(&[1.0]),
        Err(Error::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));

    Ok(())
}

#[test]
/// A scaled gradient beyond the threshold is applied as exactly ±10.
fn test_gradient_clipping() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(2, vec![], 1), &mut rng)?;

    let initial_weights = network.output.neurons[0].weights.clone();

    let mut trainer = Trainer::new(network)
        .with_learn_rate(1e9);

    // Zero input keeps the weights out of the update entirely, so the
    // whole step lands on the bias: predicted = swish(0) = 0, gradient
    // = (0 - 1) * swish_derivative(0) = -0.5, step = -5e8 clipped to
    // -10.
    trainer.train(&[Sample::new(vec![0.0, 0.0], vec![1.0])], 1)?;

    let neuron = &trainer.network().output.neurons[0];

    assert_eq!(neuron.bias, GRADIENT_CLIP_THRESHOLD);
    assert_eq!(neuron.weights, initial_weights);

    Ok(())
}

#[test]
/// Directional convergence: training must move the output towards
/// the target compared to the untrained network.
fn test_train_converges() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(2, vec![], 2), &mut rng)?;

    let mut trainer = Trainer::new(network);

    let samples = [
        Sample::new(vec![1.0, 0.0], vec![1.0, 0.0]),
        Sample::new(vec![0.0, 1.0], vec![0.0, 1.0])
    ];

    let distance = |output: &[f64]| -> f64 {
        ((output[0] - 1.0).powi(2) + output[1].powi(2)).sqrt()
    };

    let untrained = distance(&trainer.output(&[1.0, 0.0])?);

    trainer.train(&samples, 500)?;

    let trained = distance(&trainer.output(&[1.0, 0.0])?);

    assert!(trained < untrained);

    Ok(())
}

#[test]
/// Every scored layer must match the target length, including hidden
/// ones: the backward pass reuses the output target for all of them.
fn test_target_length_validation() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(2, vec![], 2), &mut rng)?;

    let mut trainer = Trainer::new(network);

    assert!(matches!(
        trainer.train(&[Sample::new(vec![1.0, 0.0], vec![1.0])], 1),
        Err(Error::InvalidTrainingConfiguration(_))
    ));

    // A hidden layer wider than the target is rejected as well.
    let network = Network::new(&Topology::new(2, vec![3], 2), &mut rng)?;

    let mut trainer = Trainer::new(network);

    assert!(matches!(
        trainer.train(&[Sample::new(vec![1.0, 0.0], vec![1.0, 0.0])], 1),
        Err(Error::InvalidTrainingConfiguration(_))
    ));

    // All layers as wide as the target train fine.
    let network = Network::new(&Topology::new(2, vec![2, 2], 2), &mut rng)?;

    let mut trainer = Trainer::new(network);

    trainer.train(&[Sample::new(vec![1.0, 0.0], vec![1.0, 0.0])], 1)?;

    Ok(())
}

#[test]
/// With two or more hidden layers the backward pass skips the last
/// hidden one.
fn test_last_hidden_layer_untouched() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(2, vec![2, 2], 2), &mut rng)?;

    let mut trainer = Trainer::new(network);

    let before = trainer.network().hidden.clone();

    trainer.train(&[Sample::new(vec![1.0, 0.0], vec![1.0, 0.0])], 1)?;

    assert_ne!(trainer.network().hidden[0].neurons[0].bias, before[0].neurons[0].bias);
    assert_eq!(trainer.network().hidden[1].neurons[0].weights, before[1].neurons[0].weights);
    assert_eq!(trainer.network().hidden[1].neurons[0].bias, before[1].neurons[0].bias);

    Ok(())
}

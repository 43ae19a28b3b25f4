use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Shape of a network: amount of raw inputs, ordered hidden layer
/// sizes (possibly empty) and amount of output neurons.
///
/// Immutable once supplied, fully determines the built network.
pub struct Topology {
    pub inputs: usize,
    pub hidden: Vec<usize>,
    pub outputs: usize
}

impl Topology {
    #[inline]
    pub fn new(inputs: usize, hidden: Vec<usize>, outputs: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Built network: hidden layers in input-to-output order plus the
/// output layer, with all weights initialized.
///
/// Constructed once from a `Topology`; afterwards only training
/// mutates the neurons' weights and biases.
///
/// ```
/// use synapselib::prelude::*;
///
/// let mut rng = fastrand::Rng::with_seed(42);
///
/// let network = Network::new(&Topology::new(2, vec![4, 3], 1), &mut rng).unwrap();
///
/// assert_eq!(network.total_layers(), 3);
/// assert_eq!(network.total_neurons(), 8);
/// ```
pub struct Network {
    pub hidden: Vec<Layer>,
    pub output: Layer
}

impl Network {
    /// Build all layers of the given topology.
    ///
    /// The first hidden layer's neurons get one weight per network
    /// input, each following hidden layer's neurons one weight per
    /// neuron of the previous hidden layer, and the output layer's
    /// neurons one weight per neuron of the last hidden layer. With
    /// no hidden layers the output layer connects straight to the
    /// inputs.
    ///
    /// Fails with `Error::InvalidTopology` when the input count,
    /// the output count or any hidden layer size is zero.
    pub fn new(topology: &Topology, rng: &mut fastrand::Rng) -> Result<Self> {
        if topology.inputs == 0 {
            return Err(Error::InvalidTopology(String::from("network must have at least one input")));
        }

        if topology.outputs == 0 {
            return Err(Error::InvalidTopology(String::from("network must have at least one output neuron")));
        }

        if let Some(i) = topology.hidden.iter().position(|size| *size == 0) {
            return Err(Error::InvalidTopology(format!("hidden layer {i} has no neurons")));
        }

        let mut hidden = Vec::with_capacity(topology.hidden.len());
        let mut fan_in = topology.inputs;

        for &size in &topology.hidden {
            hidden.push(Layer::init(size, fan_in, rng));

            fan_in = size;
        }

        Ok(Self {
            hidden,
            output: Layer::init(topology.outputs, fan_in, rng)
        })
    }

    #[inline]
    /// Amount of logical layers: hidden layers plus the output one.
    pub fn total_layers(&self) -> usize {
        self.hidden.len() + 1
    }

    /// Amount of neurons across all layers. Inputs are not neurons.
    pub fn total_neurons(&self) -> usize {
        let hidden = self.hidden.iter()
            .map(Layer::len)
            .sum::<usize>();

        hidden + self.output.len()
    }
}

#[test]
fn test_network_without_hidden_layers() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(3, vec![], 2), &mut rng)?;

    assert_eq!(network.total_layers(), 1);
    assert_eq!(network.total_neurons(), 2);

    for neuron in &network.output.neurons {
        assert_eq!(neuron.weights.len(), 3);
    }

    Ok(())
}

#[test]
fn test_network_fan_in_chain() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);

    let network = Network::new(&Topology::new(2, vec![4, 3], 1), &mut rng)?;

    assert_eq!(network.total_layers(), 3);
    assert_eq!(network.total_neurons(), 8);

    assert_eq!(network.hidden[0].len(), 4);
    assert_eq!(network.hidden[1].len(), 3);
    assert_eq!(network.output.len(), 1);

    for neuron in &network.hidden[0].neurons {
        assert_eq!(neuron.weights.len(), 2);
    }

    for neuron in &network.hidden[1].neurons {
        assert_eq!(neuron.weights.len(), 4);
    }

    assert_eq!(network.output.neurons[0].weights.len(), 3);

    Ok(())
}

#[test]
fn test_network_invalid_topology() {
    let mut rng = fastrand::Rng::with_seed(42);

    assert!(matches!(
        Network::new(&Topology::new(0, vec![], 1), &mut rng),
        Err(Error::InvalidTopology(_))
    ));

    assert!(matches!(
        Network::new(&Topology::new(1, vec![], 0), &mut rng),
        Err(Error::InvalidTopology(_))
    ));

    assert!(matches!(
        Network::new(&Topology::new(1, vec![2, 0, 3], 1), &mut rng),
        Err(Error::InvalidTopology(_))
    ));
}

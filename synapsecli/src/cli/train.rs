use std::path::PathBuf;

use clap::Args;
use colorful::Colorful;
use serde::Deserialize;

use synapselib::prelude::*;

#[derive(Deserialize)]
/// One dataset record: `{"input": [...], "target": [...]}`.
struct Record {
    input: Vec<f64>,
    target: Vec<f64>
}

#[derive(Args)]
pub struct TrainCLI {
    #[arg(long)]
    /// Path to the JSON dataset file: a list of objects with
    /// "input" and "target" number arrays.
    dataset: PathBuf,

    #[arg(long)]
    /// Amount of network inputs.
    inputs: usize,

    #[arg(long, value_delimiter = ',')]
    /// Comma-separated hidden layer sizes. No hidden layers when
    /// omitted.
    hidden: Vec<usize>,

    #[arg(long)]
    /// Amount of output neurons.
    outputs: usize,

    #[arg(long, default_value_t = 1000)]
    /// Amount of training epochs.
    epochs: usize,

    #[arg(long, default_value_t = DEFAULT_LEARN_RATE)]
    /// Learn rate of the gradient descent.
    learn_rate: f64,

    #[arg(long)]
    /// Seed of the weights initialization. Random when omitted.
    seed: Option<u64>
}

impl TrainCLI {
    pub fn execute(self) -> anyhow::Result<()> {
        let path = self.dataset.canonicalize()
            .unwrap_or(self.dataset);

        println!("⏳ Reading dataset from {path:?}...");

        let records = match std::fs::read_to_string(&path) {
            Ok(dataset) => match serde_json::from_str::<Vec<Record>>(&dataset) {
                Ok(records) => records,
                Err(err) => {
                    eprintln!("{}", format!("🧯 Failed to parse dataset: {err}").red());

                    return Ok(());
                }
            },

            Err(err) => {
                eprintln!("{}", format!("🧯 Failed to read dataset file: {err}").red());

                return Ok(());
            }
        };

        let samples = records.into_iter()
            .map(|record| Sample::new(record.input, record.target))
            .collect::<Vec<_>>();

        let topology = Topology::new(self.inputs, self.hidden, self.outputs);

        println!("⏳ Building network ({} inputs, hidden layers {:?}, {} outputs)...", topology.inputs, topology.hidden, topology.outputs);

        let mut rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new()
        };

        let network = match Network::new(&topology, &mut rng) {
            Ok(network) => network,
            Err(err) => {
                eprintln!("{}", format!("🧯 Failed to build network: {err}").red());

                return Ok(());
            }
        };

        println!("{}", "✅ Network built".green());
        println!("      Logical layers: {}", format!("{}", network.total_layers()).yellow());
        println!("             Neurons: {}", format!("{}", network.total_neurons()).yellow());

        let mut trainer = Trainer::new(network)
            .with_learn_rate(self.learn_rate);

        println!("⏳ Training on {} samples for {} epochs...", samples.len(), self.epochs);

        let now = std::time::Instant::now();

        if let Err(err) = trainer.train(&samples, self.epochs) {
            eprintln!("{}", format!("🧯 Failed to train network: {err}").red());

            return Ok(());
        }

        println!("{}", format!("✅ Trained after {:.1} seconds", now.elapsed().as_secs_f32()).green());
        println!();

        let mut squared_error_sum = 0.0;
        let mut outputs_count = 0;

        for (i, sample) in samples.iter().enumerate() {
            match trainer.output(&sample.input) {
                Ok(output) => {
                    for (output, target) in output.iter().zip(&sample.target) {
                        squared_error_sum += (output - target).powi(2);

                        outputs_count += 1;
                    }

                    let output = output.iter()
                        .map(|value| format!("{value:.4}"))
                        .collect::<Vec<_>>()
                        .join(", ");

                    println!("  📊 Sample {i}: target {:?}, output [{}]", sample.target, output.yellow());
                }

                Err(err) => {
                    eprintln!("  {}", format!("🧯 Failed to compute output: {err}").red());

                    return Ok(());
                }
            }
        }

        if outputs_count > 0 {
            println!();
            println!("  Mean squared error: {}", format!("{:.6}", squared_error_sum / outputs_count as f64).yellow());
        }

        Ok(())
    }
}

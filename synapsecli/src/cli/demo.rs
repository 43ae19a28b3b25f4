use clap::Args;
use colorful::Colorful;

use synapselib::prelude::*;

/// 5x3 bitmaps of the ten decimal digits, in digit order.
const DIGITS: [[f64; 15]; 10] = [
    [
        1.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0
    ],
    [
        0.0, 1.0, 0.0,
        1.0, 1.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 1.0, 0.0,
        1.0, 1.0, 1.0
    ],
    [
        1.0, 1.0, 1.0,
        0.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
        1.0, 0.0, 0.0,
        1.0, 1.0, 1.0
    ],
    [
        1.0, 1.0, 1.0,
        0.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
        0.0, 0.0, 1.0,
        1.0, 1.0, 1.0
    ],
    [
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
        0.0, 1.0, 1.0,
        0.0, 1.0, 1.0,
        0.0, 0.0, 1.0
    ],
    [
        1.0, 1.0, 1.0,
        1.0, 0.0, 0.0,
        1.0, 1.0, 1.0,
        0.0, 0.0, 1.0,
        1.0, 1.0, 1.0
    ],
    [
        1.0, 1.0, 1.0,
        1.0, 0.0, 0.0,
        1.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0
    ],
    [
        1.0, 1.0, 1.0,
        0.0, 0.0, 1.0,
        0.0, 0.0, 1.0,
        0.0, 0.0, 1.0,
        0.0, 0.0, 1.0
    ],
    [
        1.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0
    ],
    [
        1.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
        0.0, 0.0, 1.0,
        1.0, 1.0, 1.0
    ]
];

/// Hand-drawn 8 used as the final recognition probe.
const PROBE: [f64; 15] = [
    1.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 1.0
];

/// Rank non-negligible outputs as percentages, largest first.
///
/// Percentages are taken against the sum of all non-zero outputs;
/// values below `0.01` are dropped from the ranking.
pub fn ranked_percentages(outputs: &[f64]) -> Vec<(usize, f64)> {
    let sum = outputs.iter()
        .filter(|value| **value != 0.0)
        .sum::<f64>();

    let mut ranked = outputs.iter()
        .enumerate()
        .filter(|(_, value)| **value >= 0.01 && sum > 0.0)
        .map(|(i, value)| (i, value / sum * 100.0))
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
}

fn format_ranked(outputs: &[f64]) -> String {
    ranked_percentages(outputs).iter()
        .map(|(digit, percent)| format!("{digit}: {percent:.0}%"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Args)]
pub struct DemoCLI {
    #[arg(long, value_delimiter = ',', default_value = "10")]
    /// Comma-separated hidden layer sizes.
    ///
    /// The backward pass scores every hidden layer against the
    /// 10-wide digit target, so hidden sizes other than 10 are
    /// rejected during training.
    hidden: Vec<usize>,

    #[arg(long, default_value_t = 100000)]
    /// Amount of training epochs.
    epochs: usize,

    #[arg(long, default_value_t = DEFAULT_LEARN_RATE)]
    /// Learn rate of the gradient descent.
    learn_rate: f64,

    #[arg(long)]
    /// Seed of the weights initialization. Random when omitted.
    seed: Option<u64>
}

impl DemoCLI {
    pub fn execute(self) -> anyhow::Result<()> {
        let samples = DIGITS.iter()
            .enumerate()
            .map(|(digit, bitmap)| {
                let mut target = vec![0.0; 10];

                target[digit] = 1.0;

                Sample::new(bitmap.to_vec(), target)
            })
            .collect::<Vec<_>>();

        let topology = Topology::new(15, self.hidden, 10);

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

        println!("⏳ Training on {} digit bitmaps for {} epochs...", samples.len(), self.epochs);

        let now = std::time::Instant::now();

        if let Err(err) = trainer.train(&samples, self.epochs) {
            eprintln!("{}", format!("🧯 Failed to train network: {err}").red());

            return Ok(());
        }

        println!("{}", format!("✅ Trained after {:.1} seconds", now.elapsed().as_secs_f32()).green());
        println!();

        for sample in &samples {
            match trainer.output(&sample.input) {
                Ok(output) => {
                    let digit = sample.target.iter()
                        .position(|value| *value == 1.0)
                        .unwrap_or_default();

                    println!("  🔢 {digit} -> {}", format_ranked(&output).yellow());
                }

                Err(err) => eprintln!("  {}", format!("🧯 Failed to compute output: {err}").red())
            }
        }

        println!();
        println!("⏳ Probing a hand-drawn 8...");

        match trainer.output(&PROBE) {
            Ok(output) => println!("  🔢 {}", format_ranked(&output).yellow()),
            Err(err) => eprintln!("  {}", format!("🧯 Failed to compute output: {err}").red())
        }

        Ok(())
    }
}

#[test]
fn test_ranked_percentages() {
    // 0.009 falls under the ranking threshold, negative values still
    // count into the sum.
    let ranked = ranked_percentages(&[0.3, 0.009, 0.0, 0.7, -0.2]);

    assert_eq!(ranked.len(), 2);

    assert_eq!(ranked[0].0, 3);
    assert_eq!(ranked[1].0, 0);

    assert!((ranked[0].1 - 0.7 / 0.809 * 100.0).abs() < 1e-9);
    assert!((ranked[1].1 - 0.3 / 0.809 * 100.0).abs() < 1e-9);
}

#[test]
fn test_ranked_percentages_skips_non_positive_sum() {
    assert!(ranked_percentages(&[-0.5, 0.2]).is_empty());
    assert!(ranked_percentages(&[0.0, 0.0]).is_empty());
}

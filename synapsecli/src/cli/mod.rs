use clap::Parser;

pub mod demo;
pub mod train;

#[derive(Parser)]
/// Minimal feed-forward neural network toolkit.
pub enum CLI {
    /// Train the built-in digit recognition showcase and print
    /// ranked recognition percentages.
    Demo(demo::DemoCLI),

    /// Train a network on a JSON dataset and report its outputs.
    Train(train::TrainCLI)
}

impl CLI {
    #[inline]
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Demo(command) => command.execute(),
            Self::Train(command) => command.execute()
        }
    }
}

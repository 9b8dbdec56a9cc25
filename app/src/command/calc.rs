use parley_tools::calculate;

/// Strategy for evaluating an arithmetic expression.
#[derive(Debug, Clone, Copy)]
pub struct CalcStrategy;

impl super::CommandStrategy for CalcStrategy {
    type Input = String;

    async fn execute(&self, expression: Self::Input) -> anyhow::Result<()> {
        println!("{}", calculate(&expression));
        Ok(())
    }
}

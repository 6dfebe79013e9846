use crate::Context;
use clap::Parser;
use ethctl_common::ens::namehash;
use eyre::Result;

/// CLI arguments for `ethctl ens namehash`.
#[derive(Clone, Debug, Parser)]
pub struct NamehashArgs {
    /// The domain to hash. Works offline.
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl NamehashArgs {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let node = namehash(self.name.trim());
        ctx.shell.println(node)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::tests::context;
    use ethctl_common::shell::Verbosity;

    #[test]
    fn prints_node_even_offline() {
        let mut ctx = context(Verbosity::Normal);
        ctx.config.offline = true;
        NamehashArgs { name: "foo.eth".to_string() }.run(&ctx).unwrap();
        assert_eq!(
            ctx.shell.captured_stdout(),
            "0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f\n"
        );
    }
}

//! `nestedtwo` command

use async_trait::async_trait;
use herald_core::error::HeraldResult;
use herald_core::handler::{BotContext, Command, CommandConf, CommandDefinition};
use herald_core::interaction::Interaction;
use std::sync::Arc;

use crate::commands::{ping_conf, ping_definition};

pub struct NestedTwo {
    ctx: Arc<BotContext>,
    conf: CommandConf,
    definition: CommandDefinition,
}

impl NestedTwo {
    pub const NAME: &'static str = "nestedtwo";

    pub fn new(ctx: Arc<BotContext>) -> Self {
        let conf = ping_conf(ctx.settings(), Self::NAME);
        Self {
            ctx,
            conf,
            definition: ping_definition(Self::NAME),
        }
    }
}

#[async_trait]
impl Command for NestedTwo {
    fn conf(&self) -> &CommandConf {
        &self.conf
    }

    fn definition(&self) -> Option<&CommandDefinition> {
        Some(&self.definition)
    }

    async fn run(&self, interaction: Interaction) -> HeraldResult<()> {
        self.ctx.respond(&interaction, "Nested Pong 2!").await
    }
}

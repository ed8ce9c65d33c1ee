//! `pingtwo` command

use async_trait::async_trait;
use herald_core::error::HeraldResult;
use herald_core::handler::{BotContext, Command, CommandConf, CommandDefinition};
use herald_core::interaction::Interaction;
use std::sync::Arc;

use super::{ping_conf, ping_definition};

pub struct PingTwo {
    ctx: Arc<BotContext>,
    conf: CommandConf,
    definition: CommandDefinition,
}

impl PingTwo {
    pub const NAME: &'static str = "pingtwo";

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
impl Command for PingTwo {
    fn conf(&self) -> &CommandConf {
        &self.conf
    }

    fn definition(&self) -> Option<&CommandDefinition> {
        Some(&self.definition)
    }

    async fn run(&self, interaction: Interaction) -> HeraldResult<()> {
        self.ctx.respond(&interaction, "Pong 2!").await
    }
}

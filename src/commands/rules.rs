use clap::Args;
use serde::Serialize;

use reslug::migrate::rules::RuleSummary;
use reslug::migrate::MigrationSpec;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RulesArgs {
    /// Hyphenated slug to generate rules for
    #[arg(long, default_value = "pyenv-manager")]
    pub slug: String,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules")]
    Rules {
        from: String,
        to: String,
        rules: Vec<RuleSummary>,
    },
}

pub fn run(args: RulesArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RulesOutput> {
    let spec = MigrationSpec::new(&args.slug, "lua")?;

    Ok((
        RulesOutput::Rules {
            rules: spec.rule_summaries(),
            from: spec.from,
            to: spec.to,
        },
        0,
    ))
}

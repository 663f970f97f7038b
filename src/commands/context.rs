//! Startup wiring: config in, ready-to-use check-in service out.

use tracing::{info, warn};

use crate::analyzer::{CommandAnalyzer, LocalAnalyzer, ProfileAnalyzer, ScoreCalculator};
use crate::checkin::CheckinService;
use crate::config::AppConfig;
use crate::error::CoachLiteError;
use crate::external::ExternalCommand;
use crate::history::CheckinStore;
use crate::stage::{
    default_stage_table, load_stage_table, CommandStageMapper, StageMapper, StageSuggester,
    StageTable, TableStageMapper,
};

/// Everything a command needs, built once per process.
pub struct AppContext {
    pub config: AppConfig,
    pub service: CheckinService,
}

impl AppContext {
    pub fn from_config(config: AppConfig) -> Result<Self, CoachLiteError> {
        let calculator = ScoreCalculator::new(build_analyzer(&config)?);
        let stages = build_stage_suggester(&config)?;
        let store = CheckinStore::new(config.checkin_path());

        info!(
            "Using analyzer '{}', check-in log {:?}",
            calculator.analyzer_name(),
            store.path()
        );

        Ok(Self {
            config,
            service: CheckinService::new(calculator, stages, store),
        })
    }
}

fn build_analyzer(config: &AppConfig) -> Result<Box<dyn ProfileAnalyzer>, CoachLiteError> {
    match &config.analyzer.command {
        Some(argv) => Ok(Box::new(CommandAnalyzer::new(ExternalCommand::from_argv(argv)?))),
        None => Ok(Box::new(LocalAnalyzer)),
    }
}

fn build_stage_suggester(config: &AppConfig) -> Result<StageSuggester, CoachLiteError> {
    let primary: Option<Box<dyn StageMapper>> = match &config.stage_mapper.command {
        Some(argv) => Some(Box::new(CommandStageMapper::new(ExternalCommand::from_argv(argv)?))),
        None => None,
    };

    Ok(StageSuggester::new(primary, TableStageMapper::new(stage_table(config))))
}

/// The configured stage table, or the embedded one if it cannot be loaded.
fn stage_table(config: &AppConfig) -> StageTable {
    let Some(path) = &config.stage_mapper.table else {
        return default_stage_table();
    };

    match load_stage_table(path) {
        Ok(table) => table,
        Err(e) => {
            warn!("Using embedded stage table: {}", e);
            default_stage_table()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::TraitSet;
    use std::path::PathBuf;

    #[test]
    fn test_default_context_is_local() {
        let ctx = AppContext::from_config(AppConfig::default()).unwrap();
        assert_eq!(
            ctx.service.store().path(),
            PathBuf::from("data/lite_checkins.json").as_path()
        );

        let traits = TraitSet::new(10.0, 10.0, 90.0, 10.0).unwrap();
        assert_eq!(
            ctx.service.stages().suggest(&traits),
            "Stage 6 — Intimacy vs. Isolation"
        );
    }

    #[test]
    fn test_unreadable_table_falls_back_to_embedded() {
        let mut config = AppConfig::default();
        config.stage_mapper.table = Some(PathBuf::from("/nonexistent/stages.toml"));

        let table = stage_table(&config);
        assert_eq!(table.default, default_stage_table().default);
    }
}

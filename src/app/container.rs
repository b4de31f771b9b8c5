use std::sync::Arc;

use crate::adapters::FFmpegAdapter;
use crate::app::embed_interactor::EmbedInteractor;
use crate::config_initialization::AppConfig;
use crate::planner::CommandBuilder;
use crate::ports::ExecutePort;

pub trait AppContainer: Send + Sync {
    fn embed_interactor(&self) -> Arc<EmbedInteractor>;
}

pub struct DefaultAppContainer {
    embed_interactor: Arc<EmbedInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let execute_port = Arc::new(FFmpegAdapter::new(config.ffmpeg.clone()));
        let builder = CommandBuilder::new(config.ffmpeg.clone(), config.encode.clone());

        let embed_interactor = Arc::new(EmbedInteractor::new(
            execute_port as Arc<dyn ExecutePort>,
            builder,
        ));

        Self { embed_interactor }
    }
}

impl AppContainer for DefaultAppContainer {
    fn embed_interactor(&self) -> Arc<EmbedInteractor> {
        Arc::clone(&self.embed_interactor)
    }
}

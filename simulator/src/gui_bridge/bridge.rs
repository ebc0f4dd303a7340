use crate::generator::scenario::ScenarioConfig;
use crate::gui_bridge::model::FrameModel;
use crate::workflow::runner::Runner;
use anyhow::Result;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that hosts the radar status endpoint and accepts scenario posts.
pub struct GuiBridge {
    state: Arc<RwLock<FrameModel>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(FrameModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("frame")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<FrameModel>>| warp::reply::json(&*state.read().unwrap()));

        let scenario_route = warp::path("scenario")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |scenario: ScenarioConfig,
                 state: Arc<RwLock<FrameModel>>,
                 runner: Arc<Runner>| async move {
                    match runner.execute_scenario(&scenario) {
                        Ok(result) => {
                            let model = FrameModel::from_result(&scenario.name, &result);
                            let contact_count = model.contacts.len();
                            let mut guard = state.write().unwrap();
                            *guard = model;
                            println!(
                                "[GUI] Scenario {} -> {} rotations, {} contacts",
                                scenario.name, result.metrics.rotations_completed, contact_count
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "rotations": result.metrics.rotations_completed,
                                    "contacts": contact_count,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("scenario error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(scenario_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &FrameModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[GUI] frame ready: {} rotations, {} contacts",
            guard.rotations_completed,
            guard.contacts.len()
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> FrameModel {
        self.state.read().unwrap().clone()
    }
}

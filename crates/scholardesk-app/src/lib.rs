// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dashboard;
pub mod forms;
pub mod ids;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod screens;
pub mod state;
pub mod validation;
pub mod view;
pub mod workflow;

pub use dashboard::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use pipeline::*;
pub use record::*;
pub use screens::*;
pub use state::*;
pub use view::*;
pub use workflow::*;

use super::lock;
use crate::clients::TomApi;
use crate::domain::{
    Configuration, RenderPlan, TargetStatus, TimelapseFormat, TimelapsePlan, TimelapseSection,
};
use crate::errors::{ViewError, ViewResult};
use crate::utils::{format_instant_in, instant_from_unix, markdown_to_html};
use crate::view::{render_status, StatusView};
use chrono::{Local, TimeZone};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub const NO_INFORMATION_PLACEHOLDER: &str = "No information available!";

/// Fetches target status and renders it into a [`StatusView`]
pub struct StatusViewModel<A, V> {
    config: Arc<Configuration>,
    api: Arc<A>,
    view: Mutex<V>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag even if the refresh future is dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<A: TomApi, V: StatusView> StatusViewModel<A, V> {
    pub fn new(config: Arc<Configuration>, api: Arc<A>, view: V) -> Self {
        Self {
            config,
            api,
            view: Mutex::new(view),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Fetch the status document once and turn it into a render plan.
    ///
    /// At most one fetch is outstanding; a concurrent call returns
    /// [`ViewError::RefreshInFlight`] without touching the network.
    pub async fn refresh(&self) -> ViewResult<RenderPlan> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(ViewError::RefreshInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        let status = self.api.fetch_status(&self.config.status_url()).await?;
        build_plan(&self.config, &status)
    }

    /// Refresh and render the result, errors included, into the view.
    pub async fn update(&self) -> ViewResult<RenderPlan> {
        let result = self.refresh().await;
        match &result {
            Ok(plan) => info!(target_name = %plan.name, "target status rendered"),
            Err(ViewError::RefreshInFlight) => {
                warn!("status refresh skipped, previous one still running");
                return result;
            }
            Err(e) => warn!("status refresh failed: {}", e),
        }
        render_status(&result, &mut *lock(&self.view));
        result
    }

    /// Run `f` against the view port
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        let view = lock(&self.view);
        f(&*view)
    }
}

/// Build a render plan, formatting times in the local time zone
pub fn build_plan(config: &Configuration, status: &TargetStatus) -> ViewResult<RenderPlan> {
    build_plan_in(config, status, &Local)
}

/// Build a render plan, formatting times in `tz`
pub fn build_plan_in<Tz>(
    config: &Configuration,
    status: &TargetStatus,
    tz: &Tz,
) -> ViewResult<RenderPlan>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let description_html = match status.target.extra_fields.description_markdown.as_deref() {
        Some(md) if !md.is_empty() => markdown_to_html(md),
        _ => NO_INFORMATION_PLACEHOLDER.to_string(),
    };

    let timelapse = match status.timelapses.first() {
        None => TimelapseSection::Hidden,
        Some(tl) => {
            let format = TimelapseFormat::from_tag(&tl.format)
                .ok_or_else(|| ViewError::UnrecognizedFormat(tl.format.clone()))?;
            let created_at =
                instant_from_unix(tl.created).ok_or(ViewError::InvalidTimestamp(tl.created))?;
            TimelapseSection::Shown(TimelapsePlan {
                url: config.absolute_url(&tl.url),
                frames: tl.frames,
                created_at,
                last_updated: format_instant_in(created_at, tz),
                media: format.media_kind(),
            })
        }
    };

    Ok(RenderPlan {
        name: status.target.name.clone(),
        description_html,
        timelapse,
    })
}

//! Controller that owns the application state and drives the pipeline.

use parking_lot::{Mutex, MutexGuard};
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, warn};

use crate::{
    error::{FetchError, GeolocationError},
    fetch::fetch_weather,
    locate::{self, DEFAULT_LOCATION, Locator},
    model::{LocationQuery, Suggestion, WeatherSnapshot},
    provider::WeatherProvider,
    render::{DisplayPort, Region, Renderer, ViewState},
    sequence::Sequencer,
    suggest::{SuggestionFetcher, SuggestionUpdate},
};

const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Mutable state shared by every operation.
#[derive(Debug, Default, Clone)]
pub struct AppState {
    pub current_location: Option<LocationQuery>,
    /// Last successful snapshot; kept (but hidden) after a failed load.
    pub snapshot: Option<Arc<WeatherSnapshot>>,
    pub loading: bool,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Rendered(Arc<WeatherSnapshot>),
    Failed(FetchError),
    /// A newer load started while this one was in flight.
    Stale,
    /// Blank search text, nothing loaded.
    Ignored,
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

pub struct WeatherApp<P: ?Sized, D> {
    provider: Arc<P>,
    display: Mutex<D>,
    renderer: Mutex<Renderer>,
    state: Mutex<AppState>,
    loads: Sequencer,
    suggestions: SuggestionFetcher,
    fallback_location: String,
    geolocation_timeout: Duration,
}

impl<P, D> WeatherApp<P, D>
where
    P: WeatherProvider + ?Sized,
    D: DisplayPort,
{
    pub fn new(provider: Arc<P>, display: D) -> Self {
        Self {
            provider,
            display: Mutex::new(display),
            renderer: Mutex::new(Renderer::new()),
            state: Mutex::new(AppState::default()),
            loads: Sequencer::default(),
            suggestions: SuggestionFetcher::default(),
            fallback_location: DEFAULT_LOCATION.to_string(),
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = Mutex::new(renderer);
        self
    }

    pub fn with_fallback_location(mut self, location: impl Into<String>) -> Self {
        self.fallback_location = location.into();
        self
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    pub fn with_suggestion_fetcher(mut self, fetcher: SuggestionFetcher) -> Self {
        self.suggestions = fetcher;
        self
    }

    pub fn snapshot(&self) -> Option<Arc<WeatherSnapshot>> {
        self.state.lock().snapshot.clone()
    }

    pub fn current_location(&self) -> Option<LocationQuery> {
        self.state.lock().current_location.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn display(&self) -> MutexGuard<'_, D> {
        self.display.lock()
    }

    pub fn into_display(self) -> D {
        self.display.into_inner()
    }

    /// Fetch and render `location`, or show the error region.
    pub async fn load(&self, location: LocationQuery) -> LoadOutcome {
        let ticket = self.loads.issue();
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.current_location = Some(location.clone());
        }
        self.display.lock().set_view(&ViewState::Loading);

        let result = fetch_weather(&*self.provider, &location).await;

        if !self.loads.is_latest(ticket) {
            debug!(%location, "discarding stale weather response");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                {
                    let mut state = self.state.lock();
                    state.snapshot = Some(Arc::clone(&snapshot));
                    state.loading = false;
                }

                let mut display = self.display.lock();
                self.renderer.lock().render(&snapshot, &mut *display);
                display.set_view(&ViewState::Content);

                info!(%location, "weather rendered");
                LoadOutcome::Rendered(snapshot)
            }
            Err(err) => {
                self.state.lock().loading = false;
                error!(%location, error = %err, "Error fetching weather data");
                self.display
                    .lock()
                    .set_view(&ViewState::Error(err.user_message().to_string()));
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Submit free text from the search box. Blank input is ignored.
    pub async fn search(&self, query: &str) -> LoadOutcome {
        let query = query.trim();
        if query.is_empty() {
            return LoadOutcome::Ignored;
        }

        self.display.lock().set_suggestions(None);
        self.load(LocationQuery::new(query)).await
    }

    /// Feed search-box input to the debounced autocomplete.
    pub async fn on_search_input(&self, query: &str) -> SuggestionUpdate {
        let update = self.suggestions.on_input(&*self.provider, query).await;

        match &update {
            SuggestionUpdate::Hide => self.display.lock().set_suggestions(None),
            SuggestionUpdate::Show(list) => self.display.lock().set_suggestions(Some(list.as_slice())),
            SuggestionUpdate::Unchanged => {}
        }

        update
    }

    pub async fn select_suggestion(&self, suggestion: &Suggestion) -> LoadOutcome {
        let label = suggestion.label();
        self.display.lock().set_text(Region::SearchInput, &label);
        self.search(&label).await
    }

    /// Startup path: locate, falling back to the default location.
    pub async fn load_default<L>(&self, locator: &L) -> LoadOutcome
    where
        L: Locator + ?Sized,
    {
        let location =
            locate::resolve_location(locator, self.geolocation_timeout, &self.fallback_location)
                .await;
        self.load(location).await
    }

    /// Reload the current location, or start over when there is none.
    pub async fn refresh<L>(&self, locator: &L) -> LoadOutcome
    where
        L: Locator + ?Sized,
    {
        match self.current_location() {
            Some(location) => self.load(location).await,
            None => self.load_default(locator).await,
        }
    }

    /// User-asked geolocation. Failure is reported instead of falling back.
    pub async fn locate_current<L>(&self, locator: &L) -> Result<LoadOutcome, GeolocationError>
    where
        L: Locator + ?Sized,
    {
        match locate::try_locate(locator, self.geolocation_timeout).await {
            Ok(coords) => Ok(self.load(coords.into()).await),
            Err(err) => {
                warn!(error = %err, "geolocation failed");
                self.display
                    .lock()
                    .set_view(&ViewState::Error(err.user_message().to_string()));
                Err(err)
            }
        }
    }
}

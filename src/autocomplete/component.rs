use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures::future::{AbortHandle, Abortable, Aborted};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use validator::{Validate, ValidationErrors};

use super::{
    callbacks::{AutocompleteCallbacks, Geolocation, LoggingCallbacks},
    config::{AutocompleteConfig, NearbyPlacesApi},
    debouncer::Debouncer,
    pending_requests::PendingRequests,
    row_loaders::{build_rows, RowKey, RowLoaders},
};
use crate::{
    services::places_client::{
        place_provider::{provider_for, PlaceProvider},
        types::places_service_error::PlacesServiceError,
    },
    types::{
        lat_lng_location::LatLng,
        place_details::PlaceDetails,
        suggestion::{Geometry, Suggestion},
    },
};

const REQUEST_FAILED: &str = "request could not be completed or has been aborted";

/// A spawned upstream call. Resolves to `true` if it ran to completion and
/// `false` if an abort sweep cancelled it first.
#[derive(Debug)]
pub struct RequestHandle(JoinHandle<Result<(), Aborted>>);

impl RequestHandle {
    pub async fn settled(self) -> bool {
        matches!(self.0.await, Ok(Ok(())))
    }
}

#[derive(Debug, Default)]
struct ComponentState {
    text: String,
    results: Vec<Suggestion>,
    loaders: RowLoaders,
    pending: PendingRequests,
    list_view_displayed: bool,
    unmounted: bool,
}

struct Inner {
    config: AutocompleteConfig,
    provider: Arc<dyn PlaceProvider>,
    callbacks: Arc<dyn AutocompleteCallbacks>,
    geolocation: Option<Arc<dyn Geolocation>>,
    debouncer: Debouncer,
    state: Mutex<ComponentState>,
}

pub struct PlacesAutocompleteBuilder {
    config: AutocompleteConfig,
    provider: Option<Arc<dyn PlaceProvider>>,
    callbacks: Arc<dyn AutocompleteCallbacks>,
    geolocation: Option<Arc<dyn Geolocation>>,
}

impl PlacesAutocompleteBuilder {
    /// Overrides the provider derived from `config.api`.
    pub fn provider(mut self, provider: Arc<dyn PlaceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn callbacks(mut self, callbacks: Arc<dyn AutocompleteCallbacks>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn geolocation(mut self, geolocation: Arc<dyn Geolocation>) -> Self {
        self.geolocation = Some(geolocation);
        self
    }

    pub fn build(self) -> Result<PlacesAutocomplete, ValidationErrors> {
        self.config.validate()?;

        let provider = self
            .provider
            .unwrap_or_else(|| provider_for(&self.config));
        let state = ComponentState {
            text: self.config.default_text.clone(),
            list_view_displayed: self.config.auto_focus,
            ..Default::default()
        };

        Ok(PlacesAutocomplete {
            inner: Arc::new(Inner {
                debouncer: Debouncer::new(self.config.debounce()),
                config: self.config,
                provider,
                callbacks: self.callbacks,
                geolocation: self.geolocation,
                state: Mutex::new(state),
            }),
        })
    }
}

/// Headless place autocomplete: debounced search, row selection and detail
/// fetching over one [`PlaceProvider`].
///
/// Every state-changing operation first aborts all in-flight requests, so
/// only the most recent request can ever update the rows. Callbacks are
/// invoked without the state lock held.
#[derive(Clone)]
pub struct PlacesAutocomplete {
    inner: Arc<Inner>,
}

impl PlacesAutocomplete {
    pub fn builder(config: AutocompleteConfig) -> PlacesAutocompleteBuilder {
        PlacesAutocompleteBuilder {
            config,
            provider: None,
            callbacks: Arc::new(LoggingCallbacks),
            geolocation: None,
        }
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.inner.config
    }

    fn state(&self) -> MutexGuard<'_, ComponentState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn rows_of(&self, state: &ComponentState) -> Vec<Suggestion> {
        build_rows(
            &self.inner.config,
            self.inner.geolocation.is_some(),
            &state.results,
            &state.loaders,
        )
    }

    /// Releases the lock, then tells the UI about the new rows.
    fn publish(&self, state: MutexGuard<'_, ComponentState>) {
        let rows = self.rows_of(&state);
        drop(state);
        self.inner.callbacks.on_rows_changed(&rows);
    }

    fn abort_pending(&self, state: &mut ComponentState) {
        if !state.pending.is_empty() {
            debug!(count = state.pending.len(), "aborting pending requests");
        }
        state.pending.abort_all();
    }

    /// The abort sweep: cancels every tracked request and drops row loaders.
    fn abort_requests(&self, state: &mut ComponentState) -> bool {
        self.abort_pending(state);
        state.loaders.clear()
    }

    fn spawn_tracked<F, Fut>(&self, state: &mut ComponentState, task: F) -> RequestHandle
    where
        F: FnOnce(PlacesAutocomplete, u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let generation = state.pending.track(handle);
        let future = task(self.clone(), generation);
        RequestHandle(tokio::spawn(Abortable::new(future, registration)))
    }

    /// Locks the state if `generation` is still the current one.
    fn current_state(&self, generation: u64) -> Option<MutexGuard<'_, ComponentState>> {
        let state = self.state();
        if state.unmounted || !state.pending.is_current(generation) {
            debug!(generation, "ignoring stale response");
            return None;
        }
        Some(state)
    }

    fn report(&self, err: PlacesServiceError) {
        let callbacks = &self.inner.callbacks;
        match err {
            PlacesServiceError::Api(message) => callbacks.on_error(&message),
            PlacesServiceError::NotFound(response) => callbacks.on_not_found(&response),
            PlacesServiceError::Timeout => callbacks.on_timeout(),
            PlacesServiceError::Transport(message) | PlacesServiceError::Internal(message) => {
                error!("places request failed: {}", message);
                callbacks.on_fail(REQUEST_FAILED)
            }
        }
    }

    /// Runs the initial search for the default text.
    pub fn mount(&self) {
        let text = self.state().text.clone();
        self.handle_change_text(&text);
    }

    /// Teardown: cancels the debouncer and every pending request.
    pub fn unmount(&self) {
        self.inner.debouncer.cancel();
        let mut state = self.state();
        self.abort_requests(&mut state);
        state.unmounted = true;
        info!("places autocomplete unmounted");
    }

    /// A keystroke. The search itself goes through the debouncer.
    pub fn handle_change_text(&self, text: &str) {
        {
            let mut state = self.state();
            if state.unmounted {
                return;
            }
            state.text = text.to_string();
            state.list_view_displayed = true;
        }

        let this = self.clone();
        self.inner
            .debouncer
            .call(text.to_string(), move |text: String| {
                this.search(&text);
            });
    }

    /// External text update; searches only when it differs from the input.
    pub fn set_text(&self, text: &str) {
        if self.state().text != text {
            self.handle_change_text(text);
        }
    }

    fn accepts_query(&self, text: &str) -> bool {
        let config = &self.inner.config;
        config.supported_platform()
            && !text.trim().is_empty()
            && text.chars().count() >= config.min_length
    }

    /// Autocompletes `text` immediately, bypassing the debouncer.
    ///
    /// Returns `None` when no request was issued: the text is blank or below
    /// the minimum length (the results are cleared instead), or the component
    /// is unmounted.
    pub fn search(&self, text: &str) -> Option<RequestHandle> {
        let query = self.inner.callbacks.pre_process(text);
        let mut state = self.state();
        if state.unmounted {
            return None;
        }
        let loaders_cleared = self.abort_requests(&mut state);

        if !self.accepts_query(text) {
            state.results.clear();
            self.publish(state);
            return None;
        }

        let provider = self.inner.provider.clone();
        let handle = self.spawn_tracked(&mut state, move |this, generation| async move {
            let outcome = provider.autocomplete(&query).await;
            this.apply_results(generation, outcome, false);
        });
        if loaders_cleared {
            self.publish(state);
        }
        Some(handle)
    }

    /// Searches around a coordinate. Non-finite coordinates clear the results.
    pub fn search_nearby(&self, lat: f64, lng: f64) -> Option<RequestHandle> {
        self.request_nearby(LatLng::new(lat, lng), false)
    }

    /// With `keep_loaders`, rows already loading stay that way until the
    /// nearby request settles.
    fn request_nearby(&self, location: LatLng, keep_loaders: bool) -> Option<RequestHandle> {
        let mut state = self.state();
        if state.unmounted {
            return None;
        }
        let loaders_cleared = if keep_loaders {
            self.abort_pending(&mut state);
            false
        } else {
            self.abort_requests(&mut state)
        };

        if !location.is_finite() {
            state.results.clear();
            state.loaders.clear();
            self.publish(state);
            return None;
        }

        let provider = self.inner.provider.clone();
        let handle = self.spawn_tracked(&mut state, move |this, generation| async move {
            let outcome = provider.search_nearby(location).await;
            this.apply_results(generation, outcome, true);
        });
        if loaders_cleared {
            self.publish(state);
        }
        Some(handle)
    }

    fn apply_results(
        &self,
        generation: u64,
        outcome: Result<Vec<Suggestion>, PlacesServiceError>,
        clear_loaders: bool,
    ) {
        let Some(mut state) = self.current_state(generation) else {
            return;
        };
        if clear_loaders {
            state.loaders.clear();
        }

        match outcome {
            Ok(results) => {
                debug!(count = results.len(), "applying results");
                state.results = results;
                self.publish(state);
            }
            Err(err) => {
                self.publish(state);
                self.report(err);
            }
        }
    }

    /// A row was selected.
    ///
    /// Dynamic rows fetch details when `fetch_details` is set, the
    /// current-location row asks the geolocation source, and anything else
    /// is handed to `on_press` straight away. Returns the spawned request, if
    /// any.
    pub fn press(&self, row: &Suggestion) -> Option<RequestHandle> {
        if self.state().unmounted {
            return None;
        }

        if !row.is_predefined_place && self.inner.config.fetch_details {
            return self.fetch_details(row);
        }

        if row.is_current_location {
            return self.press_current_location(row);
        }

        let description = self.inner.callbacks.render_description(row);
        let mut state = self.state();
        let loaders_cleared = self.abort_requests(&mut state);
        state.text = description;
        state.list_view_displayed = false;
        if loaders_cleared {
            self.publish(state);
        } else {
            drop(state);
        }

        let place = self.predefined_place(row);
        self.inner.callbacks.on_press(&place, None);
        None
    }

    fn predefined_place(&self, row: &Suggestion) -> Suggestion {
        if !row.is_predefined_place {
            return row.clone();
        }
        self.inner
            .config
            .predefined_places
            .iter()
            .find(|p| p.description == row.description)
            .cloned()
            .unwrap_or_else(|| row.clone())
    }

    /// Fetches details for a dynamic row. No-op while that row is already
    /// loading or when it has no place id.
    pub fn fetch_details(&self, row: &Suggestion) -> Option<RequestHandle> {
        let place_id = row.place_id()?.to_string();
        let key = RowKey::Place(place_id.clone());

        let mut state = self.state();
        if state.unmounted || state.loaders.is_loading(&key) {
            return None;
        }
        self.abort_requests(&mut state);
        state.loaders.enable(key);

        let provider = self.inner.provider.clone();
        let row = row.clone();
        let handle = self.spawn_tracked(&mut state, move |this, generation| async move {
            let outcome = provider.place_details(&place_id).await;
            this.apply_details(generation, &row, outcome);
        });
        self.publish(state);
        Some(handle)
    }

    fn apply_details(
        &self,
        generation: u64,
        row: &Suggestion,
        outcome: Result<PlaceDetails, PlacesServiceError>,
    ) {
        let description = self.inner.callbacks.render_description(row);
        let Some(mut state) = self.current_state(generation) else {
            return;
        };
        state.loaders.clear();

        match outcome {
            Ok(details) => {
                state.text = description;
                state.list_view_displayed = false;
                self.publish(state);
                let mut place = row.clone();
                place.is_loading = false;
                self.inner.callbacks.on_press(&place, Some(&details));
            }
            Err(err) => {
                if matches!(err, PlacesServiceError::NotFound(_))
                    && self.inner.config.auto_fill_on_not_found
                {
                    state.text = description;
                }
                self.publish(state);
                self.report(err);
            }
        }
    }

    fn press_current_location(&self, row: &Suggestion) -> Option<RequestHandle> {
        let description = self.inner.callbacks.render_description(row);
        let mut state = self.state();
        self.abort_requests(&mut state);
        state.text = description;

        let Some(geolocation) = self.inner.geolocation.clone() else {
            self.publish(state);
            self.inner.callbacks.on_fail("current location is unavailable");
            return None;
        };

        state.loaders.enable(RowKey::CurrentLocation);
        let handle = self.spawn_tracked(&mut state, move |this, generation| async move {
            let position = geolocation.current_position().await;
            this.apply_current_location(generation, position);
        });
        self.publish(state);
        Some(handle)
    }

    fn apply_current_location(&self, generation: u64, position: Result<LatLng, String>) {
        let Some(mut state) = self.current_state(generation) else {
            return;
        };

        match position {
            Ok(location) if self.inner.config.nearby_places_api == NearbyPlacesApi::None => {
                state.loaders.clear();
                self.publish(state);
                let mut place =
                    Suggestion::current_location(&self.inner.config.current_location_label);
                place.geometry = Some(Geometry::at(location));
                self.inner
                    .callbacks
                    .on_press(&place, Some(&PlaceDetails::at(location)));
            }
            Ok(location) => {
                drop(state);
                self.request_nearby(location, true);
            }
            Err(message) => {
                state.loaders.clear();
                self.publish(state);
                self.inner.callbacks.on_fail(&message);
            }
        }
    }

    /// Returns `place_id` if its details list an address component whose
    /// short name is `country_code`. Not tracked by the abort sweep.
    pub async fn resolve_place_id_for_country(
        &self,
        place_id: &str,
        country_code: &str,
    ) -> Option<String> {
        if place_id.is_empty() {
            return None;
        }

        match self.inner.provider.place_details(place_id).await {
            Ok(details) if details.is_in_country(country_code) => Some(place_id.to_string()),
            Ok(_) => None,
            Err(e) => {
                error!("Failed to resolve place {} for {}: {}", place_id, country_code, e);
                None
            }
        }
    }

    pub fn rows(&self) -> Vec<Suggestion> {
        let state = self.state();
        self.rows_of(&state)
    }

    pub fn address_text(&self) -> String {
        self.state().text.clone()
    }

    pub fn set_address_text(&self, text: &str) {
        self.state().text = text.to_string();
    }

    pub fn clear_text(&self) {
        self.state().text.clear();
    }

    pub fn focus(&self) {
        self.state().list_view_displayed = true;
    }

    pub fn blur(&self) {
        self.state().list_view_displayed = false;
    }

    pub fn pending_requests(&self) -> usize {
        self.state().pending.len()
    }

    /// Whether the suggestion list should be on screen.
    pub fn is_list_visible(&self) -> bool {
        let config = &self.inner.config;
        let state = self.state();
        config.supported_platform()
            && state.list_view_displayed
            && (!state.text.is_empty()
                || !config.predefined_places.is_empty()
                || config.current_location)
    }
}

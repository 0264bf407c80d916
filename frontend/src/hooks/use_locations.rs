use shared::Hospital;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_locations";

/// A city/district pair; hospitals are only meaningful under both
#[derive(Clone, PartialEq)]
pub struct DistrictSelection {
    pub city: String,
    pub district: String,
}

#[derive(Clone)]
pub struct LocationsState {
    pub cities: Vec<String>,
    pub districts: Vec<String>,
    pub hospitals: Vec<Hospital>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseLocationsActions {
    pub load_cities: Callback<()>,
    /// Load the districts of a city; clears stale district/hospital lists
    pub select_city: Callback<String>,
    pub select_district: Callback<DistrictSelection>,
}

pub struct UseLocationsResult {
    pub state: LocationsState,
    pub actions: UseLocationsActions,
}

/// City → district → hospital cascade behind the request-creation form.
/// Selecting upstream invalidates everything downstream of it.
#[hook]
pub fn use_locations(api_client: &ApiClient) -> UseLocationsResult {
    let cities = use_state(Vec::<String>::new);
    let districts = use_state(Vec::<String>::new);
    let hospitals = use_state(Vec::<Hospital>::new);
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let load_cities = {
        let api_client = api_client.clone();
        let cities = cities.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let cities = cities.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                match api_client.cities().await {
                    Ok(list) => cities.set(list),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load cities: {}", e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let select_city = {
        let api_client = api_client.clone();
        let districts = districts.clone();
        let hospitals = hospitals.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |city: String, _| {
            let api_client = api_client.clone();
            let districts = districts.clone();
            let hospitals = hospitals.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);
                // Anything chosen under the previous city is stale now
                districts.set(Vec::new());
                hospitals.set(Vec::new());

                match api_client.districts(&city).await {
                    Ok(list) => districts.set(list),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to load districts for {}: {}", city, e),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    let select_district = {
        let api_client = api_client.clone();
        let hospitals = hospitals.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |selection: DistrictSelection, _| {
            let api_client = api_client.clone();
            let hospitals = hospitals.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                match api_client
                    .hospitals(&selection.city, &selection.district)
                    .await
                {
                    Ok(list) => hospitals.set(list),
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!(
                                "Failed to load hospitals for {}/{}: {}",
                                selection.city, selection.district, e
                            ),
                        );
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    use_effect_with((), {
        let load_cities = load_cities.clone();
        move |_| {
            load_cities.emit(());
            || ()
        }
    });

    let state = LocationsState {
        cities: (*cities).clone(),
        districts: (*districts).clone(),
        hospitals: (*hospitals).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseLocationsActions {
        load_cities,
        select_city,
        select_district,
    };

    UseLocationsResult { state, actions }
}

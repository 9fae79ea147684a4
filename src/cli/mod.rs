use crate::auth::{AuthClient, SignUpRequest};
use crate::config::AppConfig;
use crate::filters::{BathsFilter, BedsFilter, FilterController, FilterState, MoreOptions, PropertyTypeFilter};
use crate::geocoding::{Geocoder, MapboxGeocoder};
use crate::listings::ListingStore;
use crate::models::{Listing, PetPolicy, PropertyType};
use crate::search::{ResultsRoute, SearchOutcome, SearchSession, SelectionMode};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, SearchHistory};
use crate::view::{
    render_detail, render_filter_summary, render_history, render_listings, Favorites, ImageCarousel,
    MapController, TextMap,
};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(name = "rental-scout")]
#[command(version)]
#[command(about = "Search rental listings by location", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Geocode a location, record it and list matching rentals
    Search {
        location: String,
        #[command(flatten)]
        filters: FilterArgs,
        /// Apply price, beds, type and other filters to the selection
        #[arg(long)]
        strict_filters: bool,
    },
    /// Show recent searches and listings for the latest one
    Continue,
    /// Open a results page route such as "/rentals?location=Austin"
    Results {
        route: String,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        strict_filters: bool,
    },
    /// Show stored search history
    History {
        /// Remove all stored searches
        #[arg(long)]
        clear: bool,
    },
    /// Show full details for one listing
    Listing { id: u32 },
    /// Sign in to the rental API
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account on the rental API
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Minimum monthly rent; blank for none
    #[arg(long)]
    pub min_price: Option<String>,
    /// Maximum monthly rent; blank for none
    #[arg(long)]
    pub max_price: Option<String>,
    /// Bedrooms: Any, 1+, 2+, 3+, 4+, 5+
    #[arg(long)]
    pub beds: Option<String>,
    /// Bathrooms: Any, 1+, 1.5+, 2+, 3+, 4+
    #[arg(long)]
    pub baths: Option<String>,
    /// Match the bedroom count exactly
    #[arg(long)]
    pub exact_beds: bool,
    /// Apartment, House, Condo or Townhouse
    #[arg(long = "type")]
    pub property_type: Option<PropertyType>,
    /// Move-in date (YYYY-MM-DD)
    #[arg(long)]
    pub move_in: Option<NaiveDate>,
    /// small-dogs, large-dogs, cats or no-pets; repeatable
    #[arg(long = "pet")]
    pub pets: Vec<PetPolicy>,
    /// Only listings offering a short term lease
    #[arg(long)]
    pub short_term: bool,
    /// Commute destination
    #[arg(long)]
    pub commute: Option<String>,
    /// Comma separated keywords
    #[arg(long)]
    pub keywords: Option<String>,
}

impl FilterArgs {
    /// Feed the flags through a controller so they are validated exactly
    /// like interactive input
    pub fn to_filter_state(&self) -> Result<FilterState> {
        let mut controller = FilterController::new();

        if self.min_price.is_some() || self.max_price.is_some() {
            controller.apply_price_input(
                self.min_price.as_deref().unwrap_or_default(),
                self.max_price.as_deref().unwrap_or_default(),
            )?;
        }

        let beds = match &self.beds {
            Some(choice) => BedsFilter::from_choice(choice, self.exact_beds)?,
            None => BedsFilter::Any,
        };
        let baths = match &self.baths {
            Some(choice) => BathsFilter::from_choice(choice)?,
            None => BathsFilter::Any,
        };
        controller.set_beds_baths(beds, baths);

        if let Some(t) = self.property_type {
            controller.set_property_type(PropertyTypeFilter::Only(t));
        }

        let mut more = MoreOptions {
            move_in_date: self.move_in,
            short_term_lease: self.short_term,
            commute: self.commute.clone().unwrap_or_default(),
            show_commute_filters: self.commute.is_some(),
            keywords: self.keywords.clone().unwrap_or_default(),
            ..MoreOptions::default()
        };
        for pet in &self.pets {
            more.toggle_pet(*pet);
        }
        controller.set_more_options(more);

        Ok(controller.state().clone())
    }
}

fn selection_mode(strict: bool) -> SelectionMode {
    if strict {
        SelectionMode::Strict
    } else {
        SelectionMode::LocationOnly
    }
}

/// File storage in the data directory, or memory when it cannot be opened
fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    match FileStore::open(&config.data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Falling back to in-memory storage: {:#}", e);
            Arc::new(MemoryStore::new())
        }
    }
}

fn build_session(
    config: &AppConfig,
    store: Arc<dyn KeyValueStore>,
    mode: SelectionMode,
) -> Result<SearchSession<MapboxGeocoder, Arc<dyn KeyValueStore>>> {
    let geocoder = Geocoder::new(MapboxGeocoder::from_config(config)?);
    Ok(SearchSession::new(geocoder, SearchHistory::new(store), ListingStore::sample()).with_mode(mode))
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env();
    let store = open_store(&config);

    match cli.command {
        Commands::Search {
            location,
            filters,
            strict_filters,
        } => {
            let filters = filters.to_filter_state()?;
            let session = build_session(&config, store, selection_mode(strict_filters))?;
            match session.search(&location, &filters).await {
                SearchOutcome::Skipped => println!("Enter a location to search."),
                SearchOutcome::Superseded => println!("Search was replaced by a newer one."),
                SearchOutcome::Completed(results) => {
                    println!("→ {}", results.route);
                    print_results(&results.route, &filters, &results.listings);
                }
            }
        }
        Commands::Continue => {
            let session = build_session(&config, store, SelectionMode::LocationOnly)?;
            let view = session.continue_search();
            println!("Recent searches");
            println!("===============");
            println!("{}", render_history(&view.recent));
            println!();
            println!("{}", render_listings("Continue your search", &view.listings, &Favorites::default()));
        }
        Commands::Results {
            route,
            filters,
            strict_filters,
        } => {
            let route = ResultsRoute::parse(&route)?;
            let filters = filters.to_filter_state()?;
            let session = build_session(&config, store, selection_mode(strict_filters))?;
            let listings = session.results_for(&route, &filters);
            print_results(&route, &filters, &listings);
        }
        Commands::History { clear } => {
            let history = SearchHistory::new(store);
            if clear {
                history.clear()?;
                println!("Search history cleared.");
            } else {
                println!("{}", render_history(&history.load_all()));
            }
        }
        Commands::Listing { id } => {
            let listings = ListingStore::sample();
            let listing = listings
                .get(id)
                .ok_or_else(|| anyhow!("No listing with id {}", id))?;
            print!("{}", render_detail(listing, false, &ImageCarousel::for_listing(listing)));
        }
        Commands::SignIn { email, password } => {
            let auth = AuthClient::from_config(&config, store)?;
            let next = auth.sign_in(&email, &password).await?;
            println!("Signed in. → {}", next);
        }
        Commands::SignUp {
            email,
            password,
            first_name,
            last_name,
        } => {
            let auth = AuthClient::from_config(&config, store)?;
            let request = SignUpRequest {
                email,
                password,
                first_name,
                last_name,
            };
            let next = auth.sign_up(&request).await?;
            println!("Account created. → {}", next);
        }
    }

    Ok(())
}

fn print_results(route: &ResultsRoute, filters: &FilterState, listings: &[Listing]) {
    let mut map = MapController::new(TextMap::default());
    let label = route.location.clone().unwrap_or_default();
    map.show(route.coordinate, &label);
    println!("{}", map.map());

    if let Some(summary) = render_filter_summary(filters) {
        println!("Filters: {}", summary);
    }
    println!();

    let heading = if label.is_empty() { "Rentals".to_string() } else { format!("Rentals near {}", label) };
    println!("{}", render_listings(&heading, listings, &Favorites::default()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_cli_parses_search_with_filters() {
        let cli = Cli::try_parse_from([
            "rental-scout", "search", "Austin, TX", "--max-price", "2000", "--beds", "2+", "--type", "condo",
            "--pet", "cats", "--pet", "small-dogs", "--strict-filters",
        ])
        .unwrap();

        let Commands::Search { location, filters, strict_filters } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(location, "Austin, TX");
        assert!(strict_filters);

        let state = filters.to_filter_state().unwrap();
        assert_eq!(state.price.max, Some(2000));
        assert_eq!(state.beds, BedsFilter::AtLeast(2));
        assert_eq!(state.property_type, PropertyTypeFilter::Only(PropertyType::Condo));
        assert_eq!(state.more_options.pets.len(), 2);
    }

    #[test]
    fn test_filter_args_reject_inverted_price() {
        let args = FilterArgs {
            min_price: Some("10".to_string()),
            max_price: Some("5".to_string()),
            ..FilterArgs::default()
        };
        let err = args.to_filter_state().unwrap_err();
        assert_eq!(err.downcast_ref::<FilterError>(), Some(&FilterError::MinAboveMax));
    }

    #[test]
    fn test_no_flags_is_default_state() {
        assert!(FilterArgs::default().to_filter_state().unwrap().is_default());
    }

    #[test]
    fn test_cli_rejects_unknown_pet() {
        assert!(Cli::try_parse_from(["rental-scout", "search", "Austin", "--pet", "parrots"]).is_err());
    }
}

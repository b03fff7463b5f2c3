use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{error, info};

use fleet_console::config::environment::EnvironmentConfig;
use serde_json::{Map, Value};

use fleet_console::dto::{
    AssignFleetRefRequest, CreateAppointmentRequest, CreateBlogRequest,
    CreateFleetAppointmentRequest, CreateFleetNewsRequest, QueryParams, TireFormOptions,
    TireRequest, UpdateAppointmentRequest, UpdateFleetAppointmentRequest,
};
use fleet_console::models::{
    AppointmentStatus, CatalogRef, CatalogResource, FleetAppointment, FleetNews, SupportRequest,
    Tire,
};
use fleet_console::utils::errors::http_error;
use fleet_console::views::{PageSize, Searchable, StatusFilter, TableView};
use fleet_console::{AppResult, AppState};

#[derive(Parser)]
#[command(name = "fleet-console")]
#[command(about = "Fleet administration console for the tire storefront", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fleet service appointments
    Appointments {
        #[command(subcommand)]
        command: AppointmentCommands,
    },
    /// Fleet support queue and fleet contact assignment
    Support {
        #[command(subcommand)]
        command: SupportCommands,
    },
    /// Fleet news posts
    News {
        #[command(subcommand)]
        command: NewsCommands,
    },
    /// Storefront deals
    Deals {
        #[command(subcommand)]
        command: DealCommands,
    },
    /// Customer appointments
    CustomerAppointments {
        #[command(subcommand)]
        command: CustomerAppointmentCommands,
    },
    /// Tire products
    Tires {
        #[command(subcommand)]
        command: TireCommands,
    },
    /// Blog posts
    Blogs {
        #[command(subcommand)]
        command: BlogCommands,
    },
    /// Admin dashboard counts
    Dashboard,
    /// Vehicle and tire taxonomy lookups
    Catalog {
        /// makes, models, years, trims, categories, driving-types, brands, tire-sizes,
        /// vehicle-types, tire-width, tire-ratio or tire-diameter
        resource: CatalogResource,
        /// Extra query parameters (key=value)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

#[derive(clap::Args)]
struct TableArgs {
    /// Case-insensitive search term
    #[arg(long, default_value = "")]
    search: String,
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page: 5, 10, 20 or 50
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSize>,
}

#[derive(Subcommand)]
enum AppointmentCommands {
    /// List fleet appointments
    List {
        #[command(flatten)]
        table: TableArgs,
        /// Only rows with this exact status
        #[arg(long)]
        status: Option<AppointmentStatus>,
    },
    /// Show one appointment
    Show { id: String },
    /// Upcoming appointments (window decided by the backend)
    Upcoming,
    /// Appointments for one fleet vehicle
    ByVehicle { vehicle_id: String },
    /// Book a new appointment
    Create {
        #[arg(long)]
        vehicle: String,
        #[arg(long)]
        service_type: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long = "file")]
        files: Vec<String>,
    },
    /// Edit an appointment (only the given fields are sent)
    Update {
        id: String,
        #[arg(long)]
        service_type: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change the status (Pending, Confirmed, "In Progress", Completed, Cancelled)
    Status { id: String, status: AppointmentStatus },
    /// Permanently delete an appointment
    Delete { id: String },
}

#[derive(Subcommand)]
enum SupportCommands {
    /// List support requests with their assignment status
    List {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Assign or replace the fleet contact of an appointment
    Assign {
        id: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Print the edit form values for an appointment
    Form { id: String },
}

#[derive(Subcommand)]
enum NewsCommands {
    /// List fleet news
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Publish a news post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        badge: String,
        #[arg(long, default_value = "")]
        status: String,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a news post
    Delete { id: String },
}

#[derive(Subcommand)]
enum DealCommands {
    /// List deals, 10 per page
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one deal
    Show { id: String },
}

#[derive(Subcommand)]
enum CustomerAppointmentCommands {
    /// List customer appointments
    List,
    /// Show one appointment
    Show { id: String },
    /// Book an appointment; extra fields as key=value (JSON values accepted)
    Create {
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Change the given fields of an appointment
    Update {
        id: String,
        #[arg(long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, Value)>,
    },
    /// Delete an appointment
    Delete { id: String },
}

#[derive(Subcommand)]
enum TireCommands {
    /// List tires
    List,
    /// Show one tire
    Show { id: String },
    /// Print the options of every form selector
    Options,
    /// Create a tire from a JSON file
    Create {
        #[arg(long, value_parser = parse_tire_file)]
        file: TireRequest,
    },
    /// Update a tire from a JSON file; empty selections keep the current value
    Update {
        id: String,
        #[arg(long, value_parser = parse_tire_file)]
        file: TireRequest,
    },
    /// Delete a tire
    Delete { id: String },
}

#[derive(Subcommand)]
enum BlogCommands {
    /// List blog posts
    List,
    /// Publish a blog post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a blog post
    Delete { id: String },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = parse_param(raw)?;
    let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
    Ok((key, value))
}

fn parse_tire_file(path: &str) -> Result<TireRequest, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {}", path, e))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid tire JSON in '{}': {}", path, e))
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: usize = raw.parse().map_err(|_| format!("'{}' is not a number", raw))?;
    PageSize::try_from(value).map_err(|_| "page size must be one of 5, 10, 20, 50".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let cli = Cli::parse();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Fleet Console ({})", config.environment);

    let state = AppState::from_config(&config)?;
    match run(cli.command, &state, config.default_page_size).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_validation() => {
            for (field, messages) in e.field_errors() {
                eprintln!("{}: {}", field, messages.join(", "));
            }
            Err(anyhow!(e.user_message("Invalid input")))
        }
        Err(e) => {
            error!("❌ {}", e);
            Err(e.into())
        }
    }
}

async fn run(command: Commands, state: &AppState, default_page_size: PageSize) -> AppResult<()> {
    match command {
        Commands::Appointments { command } => appointments(command, state, default_page_size).await,
        Commands::Support { command } => support(command, state, default_page_size).await,
        Commands::News { command } => news(command, state).await,
        Commands::Deals { command } => deals(command, state).await,
        Commands::CustomerAppointments { command } => customer_appointments(command, state).await,
        Commands::Tires { command } => tires(command, state).await,
        Commands::Blogs { command } => blogs(command, state).await,
        Commands::Dashboard => {
            let counts = state.dashboard().counts().await?;
            for (title, value) in counts.cards() {
                println!("{:<24} {}", title, value);
            }
            Ok(())
        }
        Commands::Catalog { resource, params } => {
            let params: QueryParams = params.into_iter().collect();
            let page = state.catalog().list(resource, &params).await?;
            for entry in &page.entries {
                println!("{:<26} {}", entry.id, entry.label(resource));
            }
            if let Some(meta) = page.meta {
                println!(
                    "page {} of {} ({} total)",
                    meta.page.unwrap_or(1),
                    meta.total_page.unwrap_or(1),
                    meta.total.unwrap_or(page.entries.len() as u64)
                );
            }
            Ok(())
        }
    }
}

async fn appointments(command: AppointmentCommands, state: &AppState, default_page_size: PageSize) -> AppResult<()> {
    let service = state.appointments();
    match command {
        AppointmentCommands::List { table, status } => {
            let items = service.list(&QueryParams::new()).await?;
            let Some(items) = non_empty(items, "No fleet appointments found") else {
                return Ok(());
            };
            let mut view = TableView::with_items(items, table.page_size.unwrap_or(default_page_size));
            view.set_search(table.search);
            if let Some(status) = status {
                view.set_status_filter(StatusFilter::status(status));
            }
            view.go_to_page(table.page);
            for appointment in view.page_items() {
                print_appointment(appointment);
            }
            print_footer(&view);
            Ok(())
        }
        AppointmentCommands::Show { id } => {
            let appointment = service.get(&id).await?;
            print_appointment(&appointment);
            if let Some(fleet_ref) = &appointment.fleet_ref {
                println!("  fleet contact: {} <{}>", fleet_ref.phone, fleet_ref.email);
            }
            Ok(())
        }
        AppointmentCommands::Upcoming => {
            let items = service.get_upcoming(&QueryParams::new()).await?;
            print_appointments(&items, "No upcoming fleet appointments");
            Ok(())
        }
        AppointmentCommands::ByVehicle { vehicle_id } => {
            let items = service.get_by_vehicle(&vehicle_id).await?;
            print_appointments(&items, "No appointments for this vehicle");
            Ok(())
        }
        AppointmentCommands::Create {
            vehicle,
            service_type,
            date,
            time,
            address,
            notes,
            files,
        } => {
            let created = service
                .create(&CreateFleetAppointmentRequest {
                    fleet_vehicle: vehicle,
                    service_type,
                    date,
                    time,
                    address,
                    notes,
                    files,
                })
                .await?;
            print_appointment(&created);
            Ok(())
        }
        AppointmentCommands::Update {
            id,
            service_type,
            date,
            time,
            address,
            notes,
        } => {
            let request = UpdateFleetAppointmentRequest {
                service_type,
                date,
                time,
                address,
                notes,
                ..Default::default()
            };
            let updated = service.update(&id, &request).await?;
            print_appointment(&updated);
            Ok(())
        }
        AppointmentCommands::Status { id, status } => service.update_status(&id, status).await,
        AppointmentCommands::Delete { id } => service.delete(&id).await,
    }
}

async fn support(command: SupportCommands, state: &AppState, default_page_size: PageSize) -> AppResult<()> {
    let service = state.support();
    match command {
        SupportCommands::List { table } => {
            let items = service.list_support_requests().await?;
            let Some(items) = non_empty(items, "No support requests found") else {
                return Ok(());
            };
            let mut view = TableView::with_items(items, table.page_size.unwrap_or(default_page_size));
            view.set_search(table.search);
            view.go_to_page(table.page);
            for request in view.page_items() {
                print_support_request(request);
            }
            print_footer(&view);
            Ok(())
        }
        SupportCommands::Assign { id, phone, email, note } => {
            service
                .assign(&id, &AssignFleetRefRequest::new(phone, email, note))
                .await
        }
        SupportCommands::Form { id } => {
            let requests = service.list_support_requests().await?;
            let request = requests
                .iter()
                .find(|request| request.id() == id)
                .ok_or_else(|| http_error(404, "Support request not found"))?;
            let form = service.edit_form(request);
            println!("phone: {}", form.phone);
            println!("email: {}", form.email);
            println!("note:  {}", form.note);
            Ok(())
        }
    }
}

async fn news(command: NewsCommands, state: &AppState) -> AppResult<()> {
    let service = state.news();
    match command {
        NewsCommands::List { search } => {
            let items = service.list(&QueryParams::new()).await?;
            let Some(items) = non_empty(items, "No fleet news found") else {
                return Ok(());
            };
            let mut view: TableView<FleetNews> = TableView::with_items(items, PageSize::Fifty);
            view.set_search(search);
            for post in view.filtered() {
                println!("{:<26} {:<12} {:<10} {}", post.id, post.status, post.badge, post.title);
            }
            println!("{}", view.showing_items());
            Ok(())
        }
        NewsCommands::Create {
            title,
            description,
            badge,
            status,
            image,
        } => {
            let created = service
                .create(&CreateFleetNewsRequest {
                    title,
                    description,
                    badge,
                    status,
                    image,
                })
                .await?;
            println!("{:<26} {}", created.id, created.title);
            Ok(())
        }
        NewsCommands::Delete { id } => service.delete(&id).await,
    }
}

async fn deals(command: DealCommands, state: &AppState) -> AppResult<()> {
    let service = state.deals();
    match command {
        DealCommands::List { page } => {
            let items = service.list(&QueryParams::new()).await?;
            let Some(items) = non_empty(items, "No deals available") else {
                return Ok(());
            };
            let mut view = TableView::with_items(items, PageSize::Ten);
            view.go_to_page(page);
            for deal in view.page_items() {
                println!("{:<26} {}", deal.id, deal.title);
            }
            print_footer(&view);
            Ok(())
        }
        DealCommands::Show { id } => {
            let deal = service.get(&id).await?;
            println!("{}", deal.title);
            if let Some(description) = &deal.description {
                println!("{}", description);
            }
            if let Some(valid_to) = &deal.valid_to {
                println!("valid until {}", valid_to);
            }
            Ok(())
        }
    }
}

async fn customer_appointments(command: CustomerAppointmentCommands, state: &AppState) -> AppResult<()> {
    let service = state.customer_appointments();
    match command {
        CustomerAppointmentCommands::List => {
            let items = service.list(&QueryParams::new()).await?;
            let Some(items) = non_empty(items, "No appointments found") else {
                return Ok(());
            };
            for appointment in &items {
                println!(
                    "{:<26} {:<12} {:<11} {}",
                    appointment.id,
                    appointment.status.as_deref().unwrap_or("-"),
                    appointment.date.as_deref().unwrap_or("-"),
                    appointment.time.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        CustomerAppointmentCommands::Show { id } => {
            let appointment = service.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&appointment)?);
            Ok(())
        }
        CustomerAppointmentCommands::Create { date, time, fields } => {
            let request = CreateAppointmentRequest {
                date,
                time,
                details: fields.into_iter().collect::<Map<String, Value>>(),
            };
            let created = service.create(&request).await?;
            println!("{}", created.id);
            Ok(())
        }
        CustomerAppointmentCommands::Update { id, fields } => {
            let request = fields
                .into_iter()
                .fold(UpdateAppointmentRequest::new(), |request, (key, value)| {
                    request.with(key, value)
                });
            let updated = service.update(&id, &request).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(())
        }
        CustomerAppointmentCommands::Delete { id } => service.delete(&id).await,
    }
}

async fn tires(command: TireCommands, state: &AppState) -> AppResult<()> {
    let service = state.tires();
    match command {
        TireCommands::List => {
            let items = service.list(&QueryParams::new()).await?;
            let Some(items) = non_empty(items, "No tires found") else {
                return Ok(());
            };
            for tire in &items {
                print_tire(tire);
            }
            Ok(())
        }
        TireCommands::Show { id } => {
            let tire = service.get(&id).await?;
            print_tire(&tire);
            println!("{}", serde_json::to_string_pretty(&tire.specs)?);
            Ok(())
        }
        TireCommands::Options => {
            let options = service.form_options().await?;
            for resource in TireFormOptions::RESOURCES {
                let labels: Vec<String> = options
                    .options(resource)
                    .into_iter()
                    .map(|(id, label)| format!("{}={}", label, id))
                    .collect();
                println!("{:<14} {}", resource.name(), labels.join(", "));
            }
            Ok(())
        }
        TireCommands::Create { file } => {
            let created = service.create(&file).await?;
            print_tire(&created);
            Ok(())
        }
        TireCommands::Update { id, file } => {
            let updated = service.update(&id, &file).await?;
            print_tire(&updated);
            Ok(())
        }
        TireCommands::Delete { id } => service.delete(&id).await,
    }
}

async fn blogs(command: BlogCommands, state: &AppState) -> AppResult<()> {
    let service = state.blogs();
    match command {
        BlogCommands::List => {
            let items = service.list(&QueryParams::new()).await?;
            let Some(items) = non_empty(items, "No blogs found") else {
                return Ok(());
            };
            for blog in &items {
                println!("{:<26} {:<14} {}", blog.id, blog.category, blog.title);
            }
            Ok(())
        }
        BlogCommands::Create {
            title,
            description,
            category,
            image,
        } => {
            let created = service
                .create(&CreateBlogRequest {
                    title,
                    description,
                    category,
                    image,
                })
                .await?;
            println!("{:<26} {}", created.id, created.title);
            Ok(())
        }
        BlogCommands::Delete { id } => service.delete(&id).await,
    }
}

/// Una lista vacía no es un error: se informa y no se dibuja la tabla
fn non_empty<T>(items: Vec<T>, empty_message: &str) -> Option<Vec<T>> {
    if items.is_empty() {
        println!("{}", empty_message);
        return None;
    }
    Some(items)
}

fn print_appointment(appointment: &FleetAppointment) {
    println!(
        "{:<26} {:<12} {:<11} {:<6} {:<28} {:<10} {}",
        appointment.id,
        appointment.status,
        appointment.date,
        appointment.time,
        appointment.fleet_vehicle.display_name(),
        appointment.fleet_vehicle.license_plate,
        appointment.service_type
    );
}

fn print_appointments(items: &[FleetAppointment], empty_message: &str) {
    if items.is_empty() {
        println!("{}", empty_message);
    }
    for appointment in items {
        print_appointment(appointment);
    }
}

fn print_support_request(request: &SupportRequest) {
    let appointment = request.appointment();
    println!(
        "{:<26} {:<13} {:<12} {:<28} {}",
        request.id(),
        request.status(),
        appointment.status,
        appointment.fleet_vehicle.display_name(),
        appointment.service_type
    );
}

fn print_tire(tire: &Tire) {
    let brand = tire.brand.as_ref().map(CatalogRef::id).unwrap_or("-");
    println!(
        "{:<26} {:<14} {:>9} {:>5}  {}",
        tire.id,
        brand,
        tire.price.map(|price| format!("{:.2}", price)).unwrap_or_default(),
        tire.stock_quantity.unwrap_or(0),
        tire.name
    );
}

fn print_footer<T: Searchable>(view: &TableView<T>) {
    let pages: Vec<String> = view.page_window().iter().map(|p| p.to_string()).collect();
    let gap = if view.has_trailing_gap() { " ..." } else { "" };
    println!("{}  [{}{}]", view.showing_entries(), pages.join(" "), gap);
}

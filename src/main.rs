use chrono::NaiveDate;
use eventboard::app::App;
use eventboard::domain_model::*;
use eventboard::logger::*;
use eventboard::settings::*;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    debug!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let Some(command) = cli.command else {
        return Err(anyhow::anyhow!("no command given, see --help"));
    };

    let app = App::try_new(&project_settings).await?;
    run(&app, command).await
}

async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let signed_in = app
                .auth_service
                .login(LoginCredentials { email, password })
                .await?;
            print_json(&signed_in.user)
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let signed_in = app
                .auth_service
                .register(Registration::new(username, email, password))
                .await?;
            print_json(&signed_in.user)
        }
        Command::Logout => {
            app.auth_service.logout().await?;
            info!("logged out");
            Ok(())
        }
        Command::Whoami => {
            let Some(user) = app.auth_service.check_session().await? else {
                return Err(anyhow::anyhow!("not logged in"));
            };
            print_json(&user)
        }
        Command::Activities(command) => run_activities(app, command).await,
        Command::Organizers(command) => match command {
            OrganizersCommand::List { search, ordering } => {
                print_json(&app.organizer_service.list(search, ordering).await?)
            }
            OrganizersCommand::Show { slug } => {
                print_json(&app.organizer_service.get(&slug.parse::<Slug>()?).await?)
            }
            OrganizersCommand::Activities { slug } => {
                print_json(&app.organizer_service.activities(&slug.parse::<Slug>()?).await?)
            }
        },
        Command::Categories(command) => match command {
            CategoriesCommand::List { search, ordering } => {
                print_json(&app.category_service.list(search, ordering).await?)
            }
            CategoriesCommand::Show { slug } => {
                print_json(&app.category_service.get(&slug.parse::<Slug>()?).await?)
            }
            CategoriesCommand::Activities { slug } => {
                print_json(&app.category_service.activities(&slug.parse::<Slug>()?).await?)
            }
        },
        Command::Dashboard => print_json(&app.dashboard_service.stats().await?),
    }
}

async fn run_activities(app: &App, command: ActivitiesCommand) -> anyhow::Result<()> {
    match command {
        ActivitiesCommand::List(filters) => {
            let query = activity_query(filters)?;
            print_json(&app.activity_service.list(query).await?)
        }
        ActivitiesCommand::Show { slug } => {
            print_json(&app.activity_service.get(&slug.parse::<Slug>()?).await?)
        }
        ActivitiesCommand::Delete { slug } => {
            app.activity_service.delete(&slug.parse::<Slug>()?).await?;
            info!(%slug, "activity deleted");
            Ok(())
        }
        ActivitiesCommand::Comments { slug } => {
            print_json(&app.activity_service.comments(&slug.parse::<Slug>()?).await?)
        }
        ActivitiesCommand::Comment { slug, text } => {
            print_json(&app.activity_service.add_comment(&slug.parse::<Slug>()?, text).await?)
        }
        ActivitiesCommand::Photos { slug } => {
            print_json(&app.activity_service.photos(&slug.parse::<Slug>()?).await?)
        }
    }
}

fn activity_query(filters: ActivityFilterArgs) -> anyhow::Result<ActivityQuery> {
    let parse_date = |value: Option<String>| -> anyhow::Result<Option<NaiveDate>> {
        value
            .map(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| anyhow::anyhow!("invalid date: {}", e))
    };

    Ok(ActivityQuery {
        category: filters.category,
        organizer: filters.organizer,
        status: filters
            .status
            .map(|s| s.parse::<ActivityStatus>())
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))?,
        search: filters.search,
        ordering: filters.ordering,
        date_from: parse_date(filters.date_from)?,
        date_to: parse_date(filters.date_to)?,
        when: match (filters.upcoming, filters.past) {
            (true, _) => Some(TimeFilter::Upcoming),
            (_, true) => Some(TimeFilter::Past),
            _ => None,
        },
        price: match (filters.free, filters.paid) {
            (true, _) => Some(PriceFilter::Free),
            (_, true) => Some(PriceFilter::Paid),
            _ => None,
        },
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

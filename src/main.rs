use std::cell::RefCell;
use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use serde_json::json;
use simplelog::{ConfigBuilder, WriteLogger};

use waypost::core::config::{self, CliOverrides, ResolvedConfig, WaypostConfig};
use waypost::core::vocabulary::{CURRENT, PAGE_RELATIVE, topics};
use waypost::core::{
    BrowsingContext, DefaultVocabulary, LocalBus, MessageBus, NavigationResolver,
    NavigationService, NavigationVocabulary, PathType, SimulatedBrowser, Topic,
};
use waypost::ui::components::{Collaborators, MenuConfig, WidgetRegistry, build_menu};
use waypost::ui::enhance::ComponentUpgrader;
use waypost::ui::{EnhancementHook, Page, Widget};

#[derive(Parser)]
#[command(name = "waypost", about = "Deferred widget rendering and navigation resolution")]
struct Args {
    /// Application context, e.g. /share
    #[arg(long, global = true)]
    app_context: Option<String>,

    /// Address the simulated browser starts at
    #[arg(long, global = true)]
    current: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish a navigation request and show what the browser did
    Resolve {
        /// Optional for RELOAD_PAGE
        url: Option<String>,
        #[arg(long, default_value = topics::NAVIGATE_TO_PAGE)]
        topic: String,
        #[arg(long, default_value = PAGE_RELATIVE)]
        path_type: String,
        #[arg(long, default_value = CURRENT)]
        target: String,
    },
    /// Render a menu described by a JSON file
    Menu {
        file: PathBuf,
        /// Build the items at construction instead of on attachment
        #[arg(long)]
        immediate: bool,
        /// Render without the enhancement hook
        #[arg(long)]
        no_enhance: bool,
        /// Click the n-th menu item (0-based) after rendering
        #[arg(long)]
        click: Option<usize>,
    },
    /// Print the navigation vocabulary
    Vocabulary,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let source = config::config_source(config::config_path().as_deref());
    let (file_config, load_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => {
            eprintln!("Ignoring config file: {e}");
            (WaypostConfig::default(), Some(e))
        }
    };
    let settings = config::resolve(
        &file_config,
        &CliOverrides {
            app_context: args.app_context.clone(),
            start_address: args.current.clone(),
        },
    );

    // Initialize file logger - writes to waypost.log in current directory by default
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&settings.log_file) {
        let _ = WriteLogger::init(settings.log_level, log_config, log_file);
    }
    // Loading ran before the logger existed; record its outcome now.
    match &load_error {
        None => log::info!("Config {}", source),
        Some(e) => log::warn!("Config {} could not be used: {}", source, e),
    }
    log::info!("Waypost starting with page root {}", settings.roots().page_root);

    match args.command {
        Command::Resolve {
            url,
            topic,
            path_type,
            target,
        } => resolve(&settings, url, &topic, &path_type, &target),
        Command::Menu {
            file,
            immediate,
            no_enhance,
            click,
        } => menu(&settings, file, immediate, no_enhance, click),
        Command::Vocabulary => {
            vocabulary();
            Ok(())
        }
    }
}

fn wire(settings: &ResolvedConfig) -> (LocalBus, Rc<RefCell<SimulatedBrowser>>, NavigationService) {
    let bus = LocalBus::new();
    let browser = Rc::new(RefCell::new(SimulatedBrowser::new(&settings.start_address)));
    let service = NavigationService::subscribe(
        &bus,
        &DefaultVocabulary,
        NavigationResolver::new(settings.roots()),
        browser.clone(),
    );
    (bus, browser, service)
}

fn report(browser: &SimulatedBrowser, service: &NavigationService) -> Result<(), Box<dyn Error>> {
    let failures: Vec<String> = service.failures().iter().map(|e| e.to_string()).collect();
    let report = json!({
        "current": browser.current_address().to_string(),
        "browser": browser,
        "failures": failures,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Literals are published as given so that unknown ones reach the resolver.
fn resolve(
    settings: &ResolvedConfig,
    url: Option<String>,
    topic: &str,
    path_type: &str,
    target: &str,
) -> Result<(), Box<dyn Error>> {
    let (bus, browser, service) = wire(settings);
    let mut payload = json!({ "pathType": path_type, "targetType": target });
    if let Some(url) = url {
        payload["url"] = json!(url);
    }
    let delivery = bus.publish(topic, &payload);
    println!("delivery: {:?}", delivery);
    report(&browser.borrow(), &service)
}

fn menu(
    settings: &ResolvedConfig,
    file: PathBuf,
    immediate: bool,
    no_enhance: bool,
    click: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let mut menu_config: MenuConfig = serde_json::from_str(&fs::read_to_string(&file)?)?;
    menu_config.create_children_immediately |= immediate;

    let (bus, browser, service) = wire(settings);
    let mut page = Page::new().with_bus(bus);
    let enhancer: Option<Rc<dyn EnhancementHook>> = if no_enhance {
        None
    } else {
        Some(Rc::new(ComponentUpgrader))
    };
    let collaborators = Collaborators {
        materializer: Some(Rc::new(WidgetRegistry::default())),
        enhancer,
    };

    let widget = build_menu(page.document_mut(), menu_config, collaborators);
    let root = widget.dom_node();
    let body = page.document().body();
    page.mount(Box::new(widget), body)?;
    println!("{}", page.render());

    if let Some(index) = click {
        let container = page.document().children(body).iter().copied().find(|&n| n != root);
        let item = container.and_then(|c| page.document().children(c).get(index).copied());
        let item = item.or_else(|| page.document().children(root).get(index).copied());
        match item {
            Some(node) => {
                let delivery = page.click(node);
                println!("click: {:?}", delivery);
            }
            None => println!("click: no menu item at index {index}"),
        }
        report(&browser.borrow(), &service)?;
    }
    Ok(())
}

fn vocabulary() {
    let vocab = DefaultVocabulary;
    println!("topics:");
    for topic in Topic::ALL {
        println!("  {}", vocab.topic_name(topic));
    }
    println!("path types:");
    for path_type in PathType::ALL {
        println!("  {}", path_type);
    }
    #[allow(deprecated)]
    let alias = vocab.share_page_relative_path();
    println!("  {} (deprecated, same as {})", alias, vocab.page_relative_path());
    println!("target types:");
    println!("  {}", vocab.current_target());
    println!("  {}", vocab.new_target());
}

//! Text-menu front end for tournament registration.
//! Run with: cargo run --bin registration
//! Reads and writes player.csv and wildcard.csv in the working directory.
//! Override with env: ROSTER_FILE, LEDGER_FILE. Set RUST_LOG=info for an audit trail.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tournament_registration::{
    load_ledger, load_roster, register_player, register_with_coupon, save_ledger, save_roster,
    PlayerEdit, PlayerId, PlayerRecord, Roster, Session, WildcardLedger,
};

/// Everything the menus operate on: both collections, where they persist, and who is logged in.
struct App {
    roster: Roster,
    ledger: WildcardLedger,
    roster_path: PathBuf,
    ledger_path: PathBuf,
    session: Session,
}

impl App {
    /// Persist both files. Failures are reported, never fatal.
    fn save(&self) {
        if let Err(e) = save_roster(&self.roster_path, &self.roster) {
            log::error!("Could not save {}: {}", self.roster_path.display(), e);
            println!("Warning: could not save players ({}).", e);
        }
        if let Err(e) = save_ledger(&self.ledger_path, &self.ledger) {
            log::error!("Could not save {}: {}", self.ledger_path.display(), e);
            println!("Warning: could not save wildcards ({}).", e);
        }
    }
}

/// Outcome of one menu round.
enum Step {
    Continue,
    Quit,
}

fn default_roster_file() -> String {
    "player.csv".to_string()
}

fn default_ledger_file() -> String {
    "wildcard.csv".to_string()
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let roster_path =
        PathBuf::from(std::env::var("ROSTER_FILE").unwrap_or_else(|_| default_roster_file()));
    let ledger_path =
        PathBuf::from(std::env::var("LEDGER_FILE").unwrap_or_else(|_| default_ledger_file()));
    log::info!(
        "Using roster file {} and wildcard file {}",
        roster_path.display(),
        ledger_path.display()
    );

    let mut app = App {
        roster: load_roster(&roster_path),
        ledger: load_ledger(&ledger_path),
        roster_path,
        ledger_path,
        session: Session::LoggedOut,
    };

    loop {
        let step = match app.session {
            Session::LoggedOut => main_menu(&mut app),
            Session::Admin => admin_menu(&mut app),
            Session::Player(id) => player_menu(&mut app, id),
        };
        if let Step::Quit = step {
            app.save();
            println!("Exiting program.");
            break;
        }
    }
}

fn main_menu(app: &mut App) -> Step {
    println!("\n====== Welcome to the Tournament Registration System ======");
    println!("1. Admin Login\n2. Player Registration\n3. Player Login\n4. Exit");
    let Some(choice) = prompt("Enter your choice: ") else {
        return Step::Quit;
    };
    match choice.as_str() {
        "1" => {
            let Some(input) = prompt("Enter Admin ID (case-sensitive): ") else {
                return Step::Quit;
            };
            match Session::login_admin(&input) {
                Some(s) => app.session = s,
                None => println!("Invalid Admin ID."),
            }
        }
        "2" => return registration_menu(app),
        "3" => {
            let Some(id) = prompt_id("Enter your Player ID: ") else {
                return Step::Continue;
            };
            match Session::login_player(&app.roster, id) {
                Ok(s) => {
                    println!("Successfully logged in as Player ID: {}", id);
                    app.session = s;
                }
                Err(e) => println!("{}. Please try again.", e),
            }
        }
        "4" => return Step::Quit,
        _ => println!("Invalid choice."),
    }
    Step::Continue
}

fn registration_menu(app: &mut App) -> Step {
    println!("\nPlayer Registration:\n1. Normal Registration\n2. Wildcard Registration");
    let Some(choice) = prompt("Enter choice: ") else {
        return Step::Quit;
    };
    match choice.as_str() {
        "1" => register_interactive(app),
        "2" => {
            let Some(code) = prompt("Enter your wildcard coupon code: ") else {
                return Step::Quit;
            };
            match register_with_coupon(&mut app.roster, &mut app.ledger, &code) {
                Ok(id) => {
                    println!("Registered via wildcard with ID: {}", id);
                    app.save();
                }
                Err(e) => println!("{}.", e),
            }
        }
        _ => println!("Invalid choice."),
    }
    Step::Continue
}

fn register_interactive(app: &mut App) {
    let (Some(name), Some(rank), Some(affiliation)) = (
        prompt_text("Enter username: "),
        prompt_rank("Enter rank: "),
        prompt_text("Enter university: "),
    ) else {
        return;
    };
    match register_player(&mut app.roster, name.as_str(), rank, affiliation) {
        Ok(id) => {
            println!("Player \"{}\" registered with ID: {}", name, id);
            app.save();
        }
        Err(e) => println!("{}.", e),
    }
}

fn admin_menu(app: &mut App) -> Step {
    println!("\n--- Admin Menu ---");
    println!(
        "1. Register Player\n2. Display All Players\n3. Check-In Player\n4. Withdraw Player\n\
         5. Edit Player Info\n6. Make Wildcard\n7. View All Wildcard Entries\n8. Log Out"
    );
    let Some(choice) = prompt("Enter choice: ") else {
        return Step::Quit;
    };
    match choice.as_str() {
        "1" => register_interactive(app),
        "2" => print_roster(&app.roster),
        "3" => {
            if let Some(id) = prompt_id("Enter Player ID to check-in: ") {
                report(app.roster.check_in(id), &format!("Player ID {} checked in.", id));
                app.save();
            }
        }
        "4" => {
            if let Some(id) = prompt_id("Enter Player ID to withdraw: ") {
                report(app.roster.withdraw(id), &format!("Player ID {} withdrawn.", id));
                app.save();
            }
        }
        "5" => {
            if let Some(id) = prompt_id("Enter Player ID to edit: ") {
                edit_interactive(app, id);
            }
        }
        "6" => {
            let (Some(code), Some(name), Some(rank), Some(affiliation)) = (
                prompt_code("Enter coupon code (no spaces): "),
                prompt_text("Enter username: "),
                prompt_rank("Enter rank: "),
                prompt_text("Enter university: "),
            ) else {
                return Step::Continue;
            };
            app.ledger.add_coupon(code.as_str(), name.as_str(), rank, affiliation);
            println!("Wildcard for {} (Code: {}) added.", name, code);
            app.save();
        }
        "7" => print_ledger(&app.ledger),
        "8" => {
            app.save();
            println!("Exiting admin mode.");
            app.session = Session::LoggedOut;
        }
        _ => println!("Invalid choice!"),
    }
    Step::Continue
}

fn player_menu(app: &mut App, id: PlayerId) -> Step {
    println!("\n--- Player Menu ---");
    println!("1. View My Info\n2. Check-In\n3. Withdraw\n4. Edit Info\n5. Log Out");
    let Some(choice) = prompt("Enter choice: ") else {
        return Step::Quit;
    };
    match choice.as_str() {
        "1" => match app.roster.get(id) {
            Ok(p) => print_player(p),
            Err(e) => println!("{}.", e),
        },
        "2" => {
            report(app.roster.check_in(id), "You are checked in.");
            app.save();
        }
        "3" => {
            report(app.roster.withdraw(id), "You have been withdrawn. Exiting player mode.");
            app.session = app.session.after_withdrawal(id);
            app.save();
        }
        "4" => edit_interactive(app, id),
        "5" => {
            app.save();
            println!("Exiting player mode.");
            app.session = Session::LoggedOut;
        }
        _ => println!("Invalid choice!"),
    }
    Step::Continue
}

fn edit_interactive(app: &mut App, id: PlayerId) {
    let current = match app.roster.get(id) {
        Ok(p) => p.clone(),
        Err(e) => {
            println!("{}.", e);
            return;
        }
    };
    println!("\nEditing info (leave blank to keep the current value):");
    let Some(name) = prompt_optional_text(&format!("New username [{}]: ", current.name)) else {
        return;
    };
    let Some(rank) = prompt_optional_rank(&format!("New rank [{}]: ", current.rank)) else {
        return;
    };
    let affiliation_prompt = format!("New university [{}]: ", current.affiliation);
    let Some(affiliation) = prompt_optional_text(&affiliation_prompt) else {
        return;
    };
    report(
        app.roster.edit_info(id, PlayerEdit::from_input(&name, &rank, &affiliation)),
        "Info updated successfully.",
    );
    app.save();
}

fn report<T>(result: Result<T, tournament_registration::RosterError>, ok_message: &str) {
    match result {
        Ok(_) => println!("{}", ok_message),
        Err(e) => println!("{}.", e),
    }
}

/// Print a prompt and read one line. None on end of input.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt_id(message: &str) -> Option<PlayerId> {
    let input = prompt(message)?;
    match input.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("Player ID must be a number.");
            None
        }
    }
}

/// Non-empty text without commas (the storage format cannot hold them).
fn prompt_text(message: &str) -> Option<String> {
    loop {
        let input = prompt(message)?;
        if input.is_empty() {
            println!("This field must not be empty.");
        } else if input.contains(',') {
            println!("Commas are not allowed.");
        } else {
            return Some(input);
        }
    }
}

/// Coupon code: a single non-empty token, no whitespace or commas.
fn prompt_code(message: &str) -> Option<String> {
    loop {
        let input = prompt(message)?;
        match check_code(&input) {
            Ok(()) => return Some(input),
            Err(reason) => println!("{}", reason),
        }
    }
}

fn check_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() {
        Err("This field must not be empty.")
    } else if code.chars().any(char::is_whitespace) {
        Err("Coupon codes must not contain spaces.")
    } else if code.contains(',') {
        Err("Commas are not allowed.")
    } else {
        Ok(())
    }
}

fn prompt_optional_text(message: &str) -> Option<String> {
    loop {
        let input = prompt(message)?;
        if input.contains(',') {
            println!("Commas are not allowed.");
        } else {
            return Some(input);
        }
    }
}

fn prompt_rank(message: &str) -> Option<u32> {
    loop {
        let input = prompt(message)?;
        match parse_rank(&input) {
            Some(rank) => return Some(rank),
            None => println!("Rank must be a positive integer."),
        }
    }
}

/// Blank keeps the current rank; anything else must be a number.
fn prompt_optional_rank(message: &str) -> Option<String> {
    loop {
        let input = prompt(message)?;
        if input.is_empty() || parse_rank(&input).is_some() {
            return Some(input);
        }
        println!("Rank must be a number.");
    }
}

fn parse_rank(input: &str) -> Option<u32> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

fn print_roster(roster: &Roster) {
    if roster.is_empty() {
        println!("No players in queue.");
        return;
    }
    println!("\n{}", "=".repeat(142));
    println!(
        "| {:<6} | {:<20} | {:<6} | {:<20} | {:<19} | {:<17} | {:<9} | {:<20} |",
        "ID", "Username", "Rank", "University", "Registered", "Status", "Wildcard", "Queue"
    );
    println!("{}", "-".repeat(142));
    for p in roster.list_all() {
        println!(
            "| {:<6} | {:<20} | {:<6} | {:<20} | {:<19} | {:<17} | {:<9} | {:<20} |",
            p.id(),
            p.name,
            p.rank,
            p.affiliation,
            p.registered_at(),
            check_in_label(p),
            yes_no(p.is_wildcard()),
            queue_label(p)
        );
    }
    println!("{}", "=".repeat(142));
    println!(
        "{} in tournament, {} waiting (capacity {})",
        roster.active_count(),
        roster.waiting().count(),
        roster.capacity()
    );
}

fn print_player(p: &PlayerRecord) {
    println!("\n{}", "=".repeat(50));
    println!("Your Player Info");
    println!("{}", "=".repeat(50));
    println!("ID           : {}", p.id());
    println!("Username     : {}", p.name);
    println!("Rank         : {}", p.rank);
    println!("University   : {}", p.affiliation);
    println!("Registered   : {}", p.registered_at());
    println!("Check-In     : {}", check_in_label(p));
    println!("Wildcard     : {}", yes_no(p.is_wildcard()));
    println!("Queue Status : {}", queue_label(p));
    println!("{}", "=".repeat(50));
}

fn print_ledger(ledger: &WildcardLedger) {
    if ledger.is_empty() {
        println!("No wildcard entries.");
        return;
    }
    println!("\n{}", "=".repeat(90));
    println!(
        "| {:<12}| {:<20}| {:<6}| {:<20}| {:<10}|",
        "Coupon Code", "Username", "Rank", "University", "Used"
    );
    println!("{}", "-".repeat(90));
    for c in ledger.list() {
        println!(
            "| {:<12}| {:<20}| {:<6}| {:<20}| {:<10}|",
            c.code,
            c.name,
            c.rank,
            c.affiliation,
            yes_no(c.used)
        );
    }
    println!("{}", "=".repeat(90));
}

fn check_in_label(p: &PlayerRecord) -> &'static str {
    if p.checked_in {
        "Checked-In"
    } else {
        "Not Checked-In"
    }
}

fn queue_label(p: &PlayerRecord) -> &'static str {
    if p.in_tournament() {
        "In Tournament"
    } else {
        "Waiting"
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

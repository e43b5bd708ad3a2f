use std::io;

use smsc::SmscClient;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let login = required_env("SMSC_LOGIN")?;
    let password = required_env("SMSC_PASSWORD")?;
    let sender = required_env("SMSC_SENDER")?;
    let phone = required_env("SMSC_PHONE")?;
    let message = std::env::var("SMSC_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsc example.".to_owned());

    let mut client = SmscClient::new("", login, password, sender);
    client.enqueue(phone, message);

    let result = client.send()?;
    println!(
        "batch_id: {}, accepted_count: {}",
        result.batch_id, result.accepted_count
    );

    Ok(())
}

use colored::Color;

use crate::catalog::ServiceCatalog;
use crate::error::Result;
use crate::output::table::Table;

pub fn services_table(catalog: &ServiceCatalog) -> Result<Table> {
    let mut table = Table::new("Available GCP Services")
        .add_column("Service Name", Color::Cyan)
        .add_column("Available Roles", Color::Green);

    for service in catalog.services() {
        let levels = catalog.levels(service)?;
        table.add_row([service.to_string(), levels.join(", ")]);
    }

    Ok(table)
}

pub fn roles_table(catalog: &ServiceCatalog, service: &str) -> Result<Table> {
    let levels = catalog.levels(service)?;

    let mut table = Table::new(format!("Available Roles for {}", service))
        .add_column("Role Name", Color::Cyan)
        .add_column("Full Role ID", Color::Green);

    for level in levels {
        table.add_row([level, catalog.role(service, level)?]);
    }

    Ok(table)
}

pub fn list_services(catalog: &ServiceCatalog) -> Result<()> {
    println!("{}", services_table(catalog)?.render());
    Ok(())
}

pub fn list_roles(catalog: &ServiceCatalog, service: &str) -> Result<()> {
    println!("{}", roles_table(catalog, service)?.render());
    Ok(())
}

//! Order inspection commands.

use std::io::Write;

use vitrina_storefront::catalog::Catalog;

use super::CommandError;

/// Print one order with its lines and derived total.
///
/// # Errors
///
/// Returns `CommandError::NotFound` for an unknown order number.
pub fn show(catalog: &Catalog, id: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let order = catalog
        .order(id)
        .ok_or_else(|| CommandError::NotFound(format!("order {id}")))?;

    let mut lines = vec![
        format!("Заказ #{} от {}", order.id, order.date.format("%d.%m.%Y")),
        format!("Статус: {}", order.status.label()),
        String::new(),
    ];
    for item in &order.items {
        lines.push(format!(
            "  {} × {} = {}  {}",
            item.quantity,
            item.price,
            item.line_total()?,
            item.name
        ));
    }
    lines.extend([
        String::new(),
        format!(
            "Доставка: {}, {}, {}, {}",
            order.delivery.method, order.delivery.address, order.delivery.city, order.delivery.postal_code
        ),
        format!("Оплата: {} ({})", order.payment.method, order.payment.status.label()),
        format!("Итого: {}", order.total()?),
    ]);

    for line in lines {
        writeln!(out, "{line}").map_err(CommandError::stdout)?;
    }
    Ok(())
}

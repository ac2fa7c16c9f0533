use std::fmt::Write;

use crate::Vendor;

/// Renders the inventory table that makes up a vendor's report email
///
/// The table carries the vendor name spanning both columns, a column
/// header row, then one row per item with the quantity right-aligned.
/// Quantities use the default float formatting, so whole quantities
/// render without a fractional part.
pub fn render(vendor: &Vendor) -> String {
    let mut html = String::from("<table>\n");

    // writing into a String cannot fail
    let _ = writeln!(html, "  <tr>\n    <th colspan=\"2\">{}</th>\n  </tr>", escape(vendor.name()));
    html.push_str("  <tr>\n    <th>Item</th>\n    <th>Quantity on Hand</th>\n  </tr>\n");

    for item in vendor.items() {
        let _ = writeln!(
            html,
            "  <tr>\n    <td>{}</td>\n    <td align=\"right\">{}</td>\n  </tr>",
            escape(item.name()),
            item.quantity(),
        );
    }

    html.push_str("</table>");
    html
}

/// Escapes text for interpolation into HTML element content
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use crate::inventory::fixtures::stock_csv;
    use crate::Inventory;

    use super::*;

    fn farm_a() -> Vendor {
        let csv = stock_csv(&[
            ("Apples", "12.5", "Farm A"),
            ("Pears", "3", "Farm A"),
        ]);

        Inventory::from_reader(csv.as_bytes())
            .unwrap()
            .vendors()[0]
            .clone()
    }

    #[test]
    fn renders_the_vendor_table() {
        let html = render(&farm_a());

        assert_eq!(
            html,
            "<table>\n\
             \x20 <tr>\n    <th colspan=\"2\">Farm A</th>\n  </tr>\n\
             \x20 <tr>\n    <th>Item</th>\n    <th>Quantity on Hand</th>\n  </tr>\n\
             \x20 <tr>\n    <td>Apples</td>\n    <td align=\"right\">12.5</td>\n  </tr>\n\
             \x20 <tr>\n    <td>Pears</td>\n    <td align=\"right\">3</td>\n  </tr>\n\
             </table>",
        );
    }

    #[test]
    fn items_render_in_report_order() {
        let html = render(&farm_a());

        let apples = html.find("Apples").unwrap();
        let pears = html.find("Pears").unwrap();
        assert!(apples < pears);
    }

    #[test]
    fn whole_quantities_render_without_a_fraction() {
        let html = render(&farm_a());

        assert!(html.contains("<td align=\"right\">3</td>"));
        assert!(!html.contains("3.0"));
    }

    #[test]
    fn names_are_escaped() {
        let csv = stock_csv(&[("<b>Apples & Pears</b>", "1", "R&D \"Farm\"")]);
        let inventory = Inventory::from_reader(csv.as_bytes()).unwrap();

        let html = render(&inventory.vendors()[0]);
        assert!(html.contains("<th colspan=\"2\">R&amp;D &quot;Farm&quot;</th>"));
        assert!(html.contains("<td>&lt;b&gt;Apples &amp; Pears&lt;/b&gt;</td>"));
    }
}

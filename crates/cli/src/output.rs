//! Human-readable command output on stdout.

#![allow(clippy::print_stdout)]

use akasha_core::{Price, Product};
use akasha_storefront::session::Cart;

pub fn line(text: &str) {
    println!("{text}");
}

pub fn cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    println!("Cart ({} items)", cart.total_items());
    for item in cart.items() {
        println!(
            "  {:<28} {:<10} {:<4} x{:<3} {}",
            item.product.name,
            item.selected_color,
            item.selected_size,
            item.quantity,
            Price::usd(item.line_total()),
        );
    }
    println!("Subtotal: {}", cart.subtotal());

    if cart.qualifies_for_free_shipping() {
        println!("You qualify for free shipping");
    } else {
        println!(
            "Add {} more for free shipping",
            Price::usd(cart.amount_until_free_shipping())
        );
    }
}

pub fn products(title: &str, products: &[Product]) {
    println!("{title} ({})", products.len());
    for product in products {
        let price = product.unit_price();
        match product.original_price {
            Some(original) if product.is_on_sale() => println!(
                "  {:<20} {:<28} {} (was {})",
                product.id,
                product.name,
                price,
                Price::usd(original)
            ),
            _ => println!("  {:<20} {:<28} {}", product.id, product.name, price),
        }
    }
}

pub fn terms(title: &str, terms: &[String]) {
    println!("{title} ({})", terms.len());
    for term in terms {
        println!("  {term}");
    }
}

pub fn json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{pretty}"),
        Err(_) => println!("{value}"),
    }
}

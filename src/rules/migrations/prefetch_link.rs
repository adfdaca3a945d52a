//! Link-swap migration
//!
//! Moves the link out of a breadcrumb item and into a prefetching link
//! component rendered through `asChild`:
//!
//! ```text
//! <BreadcrumbLink href="/orders">Orders</BreadcrumbLink>
//! <BreadcrumbLink asChild><PrefetchLink href="/orders">Orders</PrefetchLink></BreadcrumbLink>
//! ```

use regex::Captures;

use crate::config::PrefetchLinkConfig;
use crate::error::ConfigError;
use crate::rules::{ImportRule, RegexRule, RuleSet, Trigger};

/// Migration name
pub const NAME: &str = "prefetch-link";

/// One-line description shown by `codemod list`
pub const DESCRIPTION: &str = "Swap raw breadcrumb links for prefetching links";

/// Build the rule set from its parameters
pub fn rule_set(config: &PrefetchLinkConfig) -> Result<RuleSet, ConfigError> {
    let outer = regex::escape(&config.outer);
    let attribute = regex::escape(&config.attribute);
    let opening = format!("<{}", config.outer);

    let import = ImportRule::new(
        format!("{NAME}/import"),
        Trigger::always().contains(opening.clone()),
        config.inner.clone(),
        config.inner_module.clone(),
    )?
    .with_anchor_module(&config.anchor_module)?
    .with_required_usage(&format!(
        r"<{}\s+{}\s*=|<{}\b",
        outer,
        attribute,
        regex::escape(&config.inner)
    ))?;

    // Attribute values: one level of nested braces covers template literals like `/orders/${id}`
    let expression_attr = RegexRule::computed(
        format!("{NAME}/expression-attr"),
        Trigger::always().contains(opening.clone()),
        &format!(
            r"(?s)<{outer}\s+{attribute}\s*=\s*(?P<value>\{{(?:[^{{}}]|\{{[^{{}}]*\}})*\}})\s*>(?P<text>.*?)</{outer}\s*>"
        ),
        wrap(config),
    )?;

    let string_attr = RegexRule::computed(
        format!("{NAME}/string-attr"),
        Trigger::always().contains(opening),
        &format!(
            r#"(?s)<{outer}\s+{attribute}\s*=\s*(?P<value>"[^"]*"|'[^']*')\s*>(?P<text>.*?)</{outer}\s*>"#
        ),
        wrap(config),
    )?;

    Ok(RuleSet::new(NAME, DESCRIPTION)
        .with_rule(import)
        .with_rule(expression_attr)
        .with_rule(string_attr))
}

/// Nested replacement; `value` and `text` are copied verbatim
fn wrap(config: &PrefetchLinkConfig) -> impl Fn(&Captures<'_>) -> String + Send + Sync + 'static {
    let outer = config.outer.clone();
    let inner = config.inner.clone();
    let attribute = config.attribute.clone();
    let flag = config.outer_flag.clone();

    move |caps| {
        format!(
            "<{outer} {flag}><{inner} {attribute}={value}>{text}</{inner}></{outer}>",
            value = &caps["value"],
            text = &caps["text"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::FileRewriter;
    use pretty_assertions::assert_eq;

    fn rewrite(input: &str) -> String {
        let set = rule_set(&PrefetchLinkConfig::default()).unwrap();
        FileRewriter::new(&set)
            .rewrite_content("page.tsx", input)
            .final_content()
            .to_string()
    }

    #[test]
    fn test_string_attribute() {
        assert_eq!(
            rewrite(r#"<BreadcrumbLink href="/orders">Orders</BreadcrumbLink>"#),
            r#"<BreadcrumbLink asChild><PrefetchLink href="/orders">Orders</PrefetchLink></BreadcrumbLink>"#
        );
    }

    #[test]
    fn test_single_quoted_attribute_keeps_quotes() {
        assert_eq!(
            rewrite("<BreadcrumbLink href='/a'>A</BreadcrumbLink>"),
            "<BreadcrumbLink asChild><PrefetchLink href='/a'>A</PrefetchLink></BreadcrumbLink>"
        );
    }

    #[test]
    fn test_expression_attribute_with_template_literal() {
        assert_eq!(
            rewrite("<BreadcrumbLink href={`/orders/${order.id}`}>{order.name}</BreadcrumbLink>"),
            "<BreadcrumbLink asChild><PrefetchLink href={`/orders/${order.id}`}>{order.name}</PrefetchLink></BreadcrumbLink>"
        );
    }

    #[test]
    fn test_multi_line_inner_text() {
        let input = "<BreadcrumbLink href=\"/\">\n  Home\n</BreadcrumbLink>";
        assert_eq!(
            rewrite(input),
            "<BreadcrumbLink asChild><PrefetchLink href=\"/\">\n  Home\n</PrefetchLink></BreadcrumbLink>"
        );
    }

    #[test]
    fn test_import_added_after_breadcrumb_import() {
        let input = "\
import {
  Breadcrumb,
  BreadcrumbLink,
} from '@/components/ui/breadcrumb'

export function Crumbs() {
  return <BreadcrumbLink href={ROUTES.home}>Home</BreadcrumbLink>
}
";
        let expected = "\
import {
  Breadcrumb,
  BreadcrumbLink,
} from '@/components/ui/breadcrumb'
import { PrefetchLink } from '@/components/ui/prefetch-link'

export function Crumbs() {
  return <BreadcrumbLink asChild><PrefetchLink href={ROUTES.home}>Home</PrefetchLink></BreadcrumbLink>
}
";
        assert_eq!(rewrite(input), expected);
    }

    #[test]
    fn test_wrapped_links_are_not_rewrapped() {
        let input = "import { PrefetchLink } from '@/components/ui/prefetch-link'\n<BreadcrumbLink asChild><PrefetchLink href=\"/x\">X</PrefetchLink></BreadcrumbLink>\n";
        assert_eq!(rewrite(input), input);
    }

    #[test]
    fn test_page_without_links_gets_no_import() {
        let input = "import { BreadcrumbPage } from '@/components/ui/breadcrumb'\n<BreadcrumbLink asChild><a href=\"/\">Home</a></BreadcrumbLink>\n";
        assert_eq!(rewrite(input), input);
    }
}

//! Client-wrapping migration
//!
//! Turns
//!
//! ```text
//! const supabase = await createClient()
//! const { data } = await supabase.auth.getUser()
//! ```
//!
//! into
//!
//! ```text
//! const client = await createClient()
//! const supabase = typed(client)
//! const { data } = await client.auth.getUser()
//! ```
//!
//! and makes sure the wrapper is imported.

use crate::config::TypedClientConfig;
use crate::error::ConfigError;
use crate::rules::{BindingReferenceRule, ImportRule, RegexRule, RuleSet, Trigger};

/// Migration name
pub const NAME: &str = "typed-client";

/// One-line description shown by `codemod list`
pub const DESCRIPTION: &str = "Wrap factory-created clients in a typed wrapper";

/// Build the rule set from its parameters
pub fn rule_set(config: &TypedClientConfig) -> Result<RuleSet, ConfigError> {
    let factory_call = format!("{}(", config.factory);
    let wrapped = format!("{}({})", config.wrapper, config.intermediate);
    let factory = regex::escape(&config.factory);

    let call_site = {
        let intermediate = config.intermediate.clone();
        let wrapper = config.wrapper.clone();
        let factory_name = config.factory.clone();

        RegexRule::computed(
            format!("{NAME}/call-site"),
            Trigger::always().contains(factory_call),
            &format!(
                r"(?m)^(?P<indent>[ \t]*)(?P<kw>const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)\s*=\s*(?P<await>await\s+)?{}\((?P<args>[^()\n]*)\)(?P<semi>;?)",
                factory
            ),
            move |caps| {
                if &caps["name"] == intermediate.as_str() {
                    return caps[0].to_string();
                }

                let indent = &caps["indent"];
                let kw = &caps["kw"];
                let awaited = caps.name("await").map_or("", |m| m.as_str());
                let semi = &caps["semi"];

                format!(
                    "{indent}{kw} {intermediate} = {awaited}{factory_name}({args}){semi}\n{indent}{kw} {name} = {wrapper}({intermediate}){semi}",
                    args = &caps["args"],
                    name = &caps["name"],
                )
            },
        )?
    };

    // Runs after the call site so it only fires where the wrapper was emitted
    let import = ImportRule::new(
        format!("{NAME}/import"),
        Trigger::always().contains(wrapped.clone()),
        config.wrapper.clone(),
        config.wrapper_module.clone(),
    )?
    .with_anchor_module(&config.anchor_module)?
    .with_required_usage(&format!(
        r"\b{}\(\s*{}\s*\)",
        regex::escape(&config.wrapper),
        regex::escape(&config.intermediate)
    ))?;

    let auth_reference = BindingReferenceRule::new(
        format!("{NAME}/{}-reference", config.accessor),
        Trigger::always()
            .contains(wrapped)
            .contains(format!(".{}.", config.accessor)),
        &config.wrapper,
        &config.intermediate,
        &config.accessor,
    )?;

    Ok(RuleSet::new(NAME, DESCRIPTION)
        .with_rule(call_site)
        .with_rule(import)
        .with_rule(auth_reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::FileRewriter;
    use pretty_assertions::assert_eq;

    fn rewrite(input: &str) -> (String, Vec<String>) {
        let set = rule_set(&TypedClientConfig::default()).unwrap();
        let outcome = FileRewriter::new(&set).rewrite_content("test.ts", input);
        (outcome.final_content().to_string(), outcome.applied_rule_ids().to_vec())
    }

    #[test]
    fn test_rule_order() {
        let set = rule_set(&TypedClientConfig::default()).unwrap();
        assert_eq!(
            set.rule_ids(),
            vec![
                "typed-client/call-site",
                "typed-client/import",
                "typed-client/auth-reference"
            ]
        );
    }

    #[test]
    fn test_full_route_handler() {
        let input = "\
import { NextResponse } from 'next/server'
import { createClient } from '@/utils/supabase/server'

export async function GET() {
  const supabase = await createClient();
  const { data: { user } } = await supabase.auth.getUser();
  const { data } = await supabase.from('orders').select('*');
  return NextResponse.json(data);
}
";
        let expected = "\
import { NextResponse } from 'next/server'
import { createClient } from '@/utils/supabase/server'
import { typed } from '@/lib/supabase/typed-client'

export async function GET() {
  const client = await createClient();
  const supabase = typed(client);
  const { data: { user } } = await client.auth.getUser();
  const { data } = await supabase.from('orders').select('*');
  return NextResponse.json(data);
}
";
        let (output, applied) = rewrite(input);

        assert_eq!(output, expected);
        assert_eq!(
            applied,
            vec![
                "typed-client/call-site",
                "typed-client/import",
                "typed-client/auth-reference"
            ]
        );
    }

    #[test]
    fn test_non_awaited_factory_and_arguments_are_preserved() {
        let (output, _) = rewrite("    let db = createClient(url, key)\n");
        assert_eq!(
            output,
            "    let client = createClient(url, key)\n    let db = typed(client)\n"
        );
    }

    #[test]
    fn test_already_bound_intermediate_is_left_alone() {
        let input = "  const client = await createClient()\n  const supabase = typed(client)\n";
        let (output, applied) = rewrite(input);

        assert_eq!(output, input);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_nested_call_arguments_leave_the_file_untouched() {
        let input = "\
import { createClient } from '@/utils/supabase/server'
import { cookies } from 'next/headers'

const supabase = await createClient(cookies())
";
        let (output, applied) = rewrite(input);

        assert_eq!(output, input);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_already_wrapped_file_gets_the_missing_import() {
        let input = "\
import { createClient } from '@/utils/supabase/server'
const client = await createClient()
const supabase = typed(client)
";
        let (output, applied) = rewrite(input);

        assert_eq!(
            output,
            "\
import { createClient } from '@/utils/supabase/server'
import { typed } from '@/lib/supabase/typed-client'
const client = await createClient()
const supabase = typed(client)
"
        );
        assert_eq!(applied, vec!["typed-client/import"]);
    }

    #[test]
    fn test_factory_name_must_match_exactly() {
        let input = "const admin = await createClientAdmin()\n";
        let (output, applied) = rewrite(input);

        assert_eq!(output, input);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_custom_parameters() {
        let config = TypedClientConfig {
            factory: "makeDb".to_string(),
            wrapper: "withSchema".to_string(),
            intermediate: "raw".to_string(),
            accessor: "session".to_string(),
            ..Default::default()
        };
        let set = rule_set(&config).unwrap();
        let outcome = FileRewriter::new(&set)
            .rewrite_content("x.ts", "const db = makeDb()\ndb.session.refresh()\n");

        assert_eq!(
            outcome.final_content(),
            "const raw = makeDb()\nconst db = withSchema(raw)\nraw.session.refresh()\n"
        );
    }
}

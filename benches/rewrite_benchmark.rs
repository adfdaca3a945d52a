use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use codemod::config::{FilesConfig, PrefetchLinkConfig, TypedClientConfig};
use codemod::rewriter::FileRewriter;
use codemod::rules::migrations::{prefetch_link, typed_client};
use codemod::runner::Runner;
use codemod::scanner::FileSelector;
use codemod::writer::BackupWriter;
use std::fs;
use tempfile::TempDir;

const HANDLER: &str = "\
import { NextResponse } from 'next/server'
import { createClient } from '@/utils/supabase/server'

export async function GET() {
  const supabase = await createClient()
  const { data: { user } } = await supabase.auth.getUser()
  const { data } = await supabase.from('orders').select('*').eq('user_id', user.id)
  return NextResponse.json(data)
}
";

const BREADCRUMBS: &str = "\
import { BreadcrumbLink } from '@/components/ui/breadcrumb'

export function Trail({ order }) {
  return (
    <>
      <BreadcrumbLink href=\"/orders\">Orders</BreadcrumbLink>
      <BreadcrumbLink href={`/orders/${order.id}`}>{order.name}</BreadcrumbLink>
    </>
  )
}
";

// Content of roughly `handlers` route handlers concatenated
fn handler_source(handlers: usize) -> String {
    HANDLER.repeat(handlers)
}

fn create_project(files: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..files {
        let dir = temp_dir.path().join(format!("src/app/api/r{}", i));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("route.ts"), HANDLER).unwrap();
        fs::write(dir.join("Trail.tsx"), BREADCRUMBS).unwrap();
    }
    temp_dir
}

fn bench_rewrite_content(c: &mut Criterion) {
    let set = typed_client::rule_set(&TypedClientConfig::default()).unwrap();
    let rewriter = FileRewriter::new(&set);

    let mut group = c.benchmark_group("rewrite_content");
    for handlers in [1, 10, 100] {
        let source = handler_source(handlers);
        group.bench_with_input(BenchmarkId::new("typed_client", handlers), &source, |b, s| {
            b.iter(|| rewriter.rewrite_content("route.ts", black_box(s)))
        });
    }
    group.finish();
}

fn bench_already_migrated(c: &mut Criterion) {
    let set = prefetch_link::rule_set(&PrefetchLinkConfig::default()).unwrap();
    let rewriter = FileRewriter::new(&set);
    let migrated = rewriter
        .rewrite_content("Trail.tsx", BREADCRUMBS)
        .final_content()
        .to_string();

    c.bench_function("prefetch_link_already_migrated", |b| {
        b.iter(|| rewriter.rewrite_content("Trail.tsx", black_box(&migrated)))
    });
}

fn bench_dry_run(c: &mut Criterion) {
    let set = typed_client::rule_set(&TypedClientConfig::default()).unwrap();

    let mut group = c.benchmark_group("dry_run");
    group.sample_size(20);
    for files in [10, 100] {
        let project = create_project(files);
        let selector = FileSelector::new(project.path(), &FilesConfig::default(), &[]).unwrap();
        let paths = selector.select();
        let runner = Runner::new(&set, BackupWriter::default().dry_run(true));

        group.bench_with_input(BenchmarkId::new("files", files), &paths, |b, paths| {
            b.iter(|| runner.run(black_box(paths.clone())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rewrite_content, bench_already_migrated, bench_dry_run);
criterion_main!(benches);

//! Interchange document serialization.
//!
//! Renders a `ClipStore` (plus optional chapter markers) into one FCPXML
//! document: a version-stamped root holding a single shared `<resources>`
//! section and one project subtree per chapter range. The whole document is
//! built in memory and only returned on full success; a failed export
//! produces no partial output.

use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::registry::ResourceRegistry;
use super::types::{AssetCatalog, ExportOptions, MediaCategory};
use crate::chapters::{clips_for_range, partition, ChapterMarker};
use crate::error::{Error, Result};
use crate::time::RationalTime;
use crate::timeline::{Clip, ClipStore};

const FCPXML_VERSION: &str = "1.11";

/// One project subtree to render: a named sequence of spine clips, each
/// possibly carrying connected (non-primary-lane) children.
struct ProjectPlan {
    name: String,
    duration: RationalTime,
    spine: Vec<SpineClip>,
}

struct SpineClip {
    clip: Clip,
    connected: Vec<Clip>,
}

impl ProjectPlan {
    fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.spine
            .iter()
            .flat_map(|s| std::iter::once(&s.clip).chain(s.connected.iter()))
    }
}

/// Export the whole store as a single-project document.
///
/// Primary-lane clips form the spine in offset order; each connected clip is
/// nested inside the primary clip whose interval contains its start, with
/// its offset re-based into the parent's source time. A connected clip with
/// no containing primary clip has nothing to anchor to and is skipped with a
/// warning.
pub fn export_timeline(
    store: &ClipStore,
    catalog: &AssetCatalog,
    options: &ExportOptions,
) -> Result<String> {
    if store.is_empty() {
        return Err(Error::EmptyTimeline);
    }
    let plan = ProjectPlan {
        name: options.document_name.clone(),
        duration: store.duration(),
        spine: build_spine(store),
    };
    render(&[plan], catalog, options)
}

/// Export one document with one project per chapter range.
///
/// Ranges come from [`partition`]; each project holds the primary-lane clips
/// that start inside its range, retimed to range-relative zero. All projects
/// share one resource section: an asset used in several chapters is declared
/// exactly once.
pub fn export_chaptered(
    store: &ClipStore,
    markers: &[ChapterMarker],
    catalog: &AssetCatalog,
    options: &ExportOptions,
) -> Result<String> {
    if store.is_empty() {
        return Err(Error::EmptyTimeline);
    }
    let ranges = partition(store, markers, &options.default_chapter_name);
    let plans: Vec<ProjectPlan> = ranges
        .iter()
        .map(|range| ProjectPlan {
            name: range.name.clone(),
            duration: range.duration(),
            spine: clips_for_range(store, range)
                .into_iter()
                .map(|clip| SpineClip {
                    clip,
                    connected: Vec::new(),
                })
                .collect(),
        })
        .collect();
    render(&plans, catalog, options)
}

/// [`export_timeline`] straight to a file.
pub fn export_timeline_to_file(
    path: &Path,
    store: &ClipStore,
    catalog: &AssetCatalog,
    options: &ExportOptions,
) -> Result<()> {
    let xml = export_timeline(store, catalog, options)?;
    std::fs::write(path, xml)?;
    tracing::debug!("Wrote timeline export to {}", path.display());
    Ok(())
}

/// [`export_chaptered`] straight to a file.
pub fn export_chaptered_to_file(
    path: &Path,
    store: &ClipStore,
    markers: &[ChapterMarker],
    catalog: &AssetCatalog,
    options: &ExportOptions,
) -> Result<()> {
    let xml = export_chaptered(store, markers, catalog, options)?;
    std::fs::write(path, xml)?;
    tracing::debug!("Wrote chaptered export to {}", path.display());
    Ok(())
}

/// Assemble the spine with connected clips attached to their anchors.
fn build_spine(store: &ClipStore) -> Vec<SpineClip> {
    let mut spine: Vec<SpineClip> = store
        .placements_in_lane(0)
        .into_iter()
        .map(|clip| SpineClip {
            clip: clip.clone(),
            connected: Vec::new(),
        })
        .collect();

    let mut connected: Vec<&Clip> = store.clips().iter().filter(|c| c.lane != 0).collect();
    connected.sort_by_key(|c| (c.offset, c.lane));

    for clip in connected {
        match spine
            .iter_mut()
            .find(|s| s.clip.offset <= clip.offset && clip.offset < s.clip.end())
        {
            Some(parent) => {
                let mut child = clip.clone();
                // Offset in the parent's source time.
                child.offset = clip.offset - parent.clip.offset + parent.clip.source_start;
                parent.connected.push(child);
            }
            None => {
                tracing::warn!(
                    "Connected clip {} at {} has no primary-lane anchor; skipped",
                    clip.id,
                    clip.offset
                );
            }
        }
    }
    spine
}

/// Registry pass then tree construction.
fn render(
    plans: &[ProjectPlan],
    catalog: &AssetCatalog,
    options: &ExportOptions,
) -> Result<String> {
    // Scan every clip across every project before any XML is written, so a
    // missing catalog entry surfaces with no partial output.
    let mut registry = ResourceRegistry::new();
    let format_id = registry.id_for_format(&options.format);
    for plan in plans {
        for clip in plan.clips() {
            if catalog.get(&clip.asset).is_none() {
                return Err(Error::AssetNotRegistered(clip.asset.clone()));
            }
            registry.id_for_asset(&clip.asset);
        }
    }
    tracing::debug!(
        resources = registry.len(),
        projects = plans.len(),
        "built resource registry"
    );

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::new("fcpxml")))?;

    let mut root = BytesStart::new("fcpxml");
    root.push_attribute(("version", FCPXML_VERSION));
    writer.write_event(Event::Start(root))?;

    write_resources(&mut writer, &registry, catalog)?;
    for plan in plans {
        write_project(&mut writer, plan, &format_id, &registry)?;
    }

    writer.write_event(Event::End(BytesEnd::new("fcpxml")))?;

    let buf = writer.into_inner().into_inner();
    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

fn write_resources<W: std::io::Write>(
    writer: &mut Writer<W>,
    registry: &ResourceRegistry,
    catalog: &AssetCatalog,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("resources")))?;

    for (id, format) in registry.formats() {
        let mut elem = BytesStart::new("format");
        elem.push_attribute(("id", id));
        elem.push_attribute(("name", format.name.as_str()));
        elem.push_attribute(("frameDuration", format.frame_duration.to_string().as_str()));
        elem.push_attribute(("width", format.width.to_string().as_str()));
        elem.push_attribute(("height", format.height.to_string().as_str()));
        writer.write_event(Event::Empty(elem))?;
    }

    for (id, asset_ref) in registry.assets() {
        let info = catalog
            .get(asset_ref)
            .ok_or_else(|| Error::AssetNotRegistered(asset_ref.clone()))?;
        let mut elem = BytesStart::new("asset");
        elem.push_attribute(("id", id));
        elem.push_attribute(("name", info.name.as_str()));
        elem.push_attribute(("duration", info.duration.to_string().as_str()));
        match info.category {
            MediaCategory::Audio => elem.push_attribute(("hasAudio", "1")),
            MediaCategory::Video => elem.push_attribute(("hasVideo", "1")),
            MediaCategory::Image => elem.push_attribute(("hasVideo", "1")),
        }
        writer.write_event(Event::Start(elem))?;

        let mut rep = BytesStart::new("media-rep");
        rep.push_attribute(("kind", "original-media"));
        rep.push_attribute(("src", info.src.as_str()));
        writer.write_event(Event::Empty(rep))?;

        writer.write_event(Event::End(BytesEnd::new("asset")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("resources")))?;
    Ok(())
}

fn write_project<W: std::io::Write>(
    writer: &mut Writer<W>,
    plan: &ProjectPlan,
    format_id: &str,
    registry: &ResourceRegistry,
) -> Result<()> {
    let mut project = BytesStart::new("project");
    project.push_attribute(("name", plan.name.as_str()));
    writer.write_event(Event::Start(project))?;

    let mut sequence = BytesStart::new("sequence");
    sequence.push_attribute(("format", format_id));
    sequence.push_attribute(("duration", plan.duration.to_string().as_str()));
    // Internal clock always starts at zero.
    sequence.push_attribute(("tcStart", "0s"));
    sequence.push_attribute(("tcFormat", "NDF"));
    writer.write_event(Event::Start(sequence))?;

    writer.write_event(Event::Start(BytesStart::new("spine")))?;
    for spine_clip in &plan.spine {
        write_clip(writer, &spine_clip.clip, &spine_clip.connected, registry)?;
    }
    writer.write_event(Event::End(BytesEnd::new("spine")))?;

    writer.write_event(Event::End(BytesEnd::new("sequence")))?;
    writer.write_event(Event::End(BytesEnd::new("project")))?;
    Ok(())
}

fn write_clip<W: std::io::Write>(
    writer: &mut Writer<W>,
    clip: &Clip,
    connected: &[Clip],
    registry: &ResourceRegistry,
) -> Result<()> {
    let elem = clip_element(clip, registry)?;
    if connected.is_empty() {
        writer.write_event(Event::Empty(elem))?;
    } else {
        writer.write_event(Event::Start(elem))?;
        for child in connected {
            writer.write_event(Event::Empty(clip_element(child, registry)?))?;
        }
        writer.write_event(Event::End(BytesEnd::new("asset-clip")))?;
    }
    Ok(())
}

fn clip_element(clip: &Clip, registry: &ResourceRegistry) -> Result<BytesStart<'static>> {
    let id = registry
        .asset_id(&clip.asset)
        .ok_or_else(|| Error::AssetNotRegistered(clip.asset.clone()))?;
    let mut elem = BytesStart::new("asset-clip");
    elem.push_attribute(("ref", id));
    if clip.lane != 0 {
        elem.push_attribute(("lane", clip.lane.to_string().as_str()));
    }
    elem.push_attribute(("offset", clip.offset.to_string().as_str()));
    if let Some(name) = &clip.name {
        elem.push_attribute(("name", name.as_str()));
    }
    if !clip.source_start.is_zero() {
        elem.push_attribute(("start", clip.source_start.to_string().as_str()));
    }
    elem.push_attribute(("duration", clip.duration.to_string().as_str()));
    Ok(elem)
}

// hdiutil-cli/src/main.rs
//
// Binary entry point: parses the command line, sets up logging and
// dispatches into hdiutil-core.

mod cli;

use std::process;

use clap::Parser;

use cli::{
    AttachArgs, Cli, Commands, ConvertArgs, CreateArgs, DetachArgs, MakehybridArgs, VerifyArgs,
};
use hdiutil_core::attach::{
    AttachOption, AutoFsck, MountPoint, MountRoot, NoBrowse, NoMount, RwMode, Verify,
};
use hdiutil_core::convert::{ConvertOption, Tasks};
use hdiutil_core::create::{AttachAfter, CreateOption, Overwrite, Volname};
use hdiutil_core::detach::{DetachOption, Force};
use hdiutil_core::makehybrid::{
    DefaultVolumeName, Hfs, Iso, Joliet, MakehybridOption, Udf,
};
use hdiutil_core::options::Shadow;
use hdiutil_core::verify::{Cache, VerifyOption};
use hdiutil_core::{Error, Hdiutil, Result, SizeSpec};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // --hdiutil also picks up $HDIUTIL_PATH via clap's env support.
    let hdiutil = match cli.hdiutil {
        Some(path) => Hdiutil::with_binary(path),
        None => Hdiutil::new(),
    };

    match cli.command {
        Commands::Create(args) => run_create(&hdiutil, args),
        Commands::Attach(args) => run_attach(&hdiutil, args),
        Commands::Detach(args) => run_detach(&hdiutil, args),
        Commands::Verify(args) => run_verify(&hdiutil, args),
        Commands::Convert(args) => run_convert(&hdiutil, args),
        Commands::Makehybrid(args) => run_makehybrid(&hdiutil, args),
    }
}

fn run_create(hdiutil: &Hdiutil, args: CreateArgs) -> Result<()> {
    let size = if let Some(spec) = args.size {
        SizeSpec::Size(spec)
    } else if let Some(megabytes) = args.megabytes {
        SizeSpec::Megabytes(megabytes)
    } else if let Some(sectors) = args.sectors {
        SizeSpec::Sectors(sectors)
    } else if let Some(folder) = args.srcfolder {
        SizeSpec::Srcfolder(folder)
    } else {
        return Err(Error::MissingRequired("size specification"));
    };

    let mut options: Vec<Box<dyn CreateOption>> = Vec::new();
    if let Some(fs) = args.fs {
        options.push(Box::new(fs));
    }
    if let Some(image_type) = args.image_type {
        options.push(Box::new(image_type));
    }
    if let Some(format) = args.format {
        options.push(Box::new(format));
    }
    if let Some(volname) = args.volname {
        options.push(Box::new(Volname(volname)));
    }
    if args.overwrite {
        options.push(Box::new(Overwrite(true)));
    }
    if args.attach {
        options.push(Box::new(AttachAfter(true)));
    }

    let option_refs: Vec<&dyn CreateOption> = options.iter().map(|opt| opt.as_ref()).collect();
    hdiutil.create(&args.image, &size, &option_refs)
}

fn run_attach(hdiutil: &Hdiutil, args: AttachArgs) -> Result<()> {
    let mut options: Vec<Box<dyn AttachOption>> = Vec::new();
    if args.readonly {
        options.push(Box::new(RwMode::Readonly));
    }
    if args.readwrite {
        options.push(Box::new(RwMode::ReadWrite));
    }
    if let Some(mountpoint) = args.mountpoint {
        options.push(Box::new(MountPoint(mountpoint)));
    }
    if let Some(mountroot) = args.mountroot {
        options.push(Box::new(MountRoot(mountroot)));
    }
    if args.nobrowse {
        options.push(Box::new(NoBrowse(true)));
    }
    if args.nomount {
        options.push(Box::new(NoMount(true)));
    }
    if args.noverify {
        options.push(Box::new(Verify(false)));
    }
    if args.noautofsck {
        options.push(Box::new(AutoFsck(false)));
    }
    if let Some(shadow) = args.shadow {
        options.push(Box::new(Shadow(shadow)));
    }

    let option_refs: Vec<&dyn AttachOption> = options.iter().map(|opt| opt.as_ref()).collect();
    let node = hdiutil.attach(&args.image, &option_refs)?;

    if node.is_empty() {
        log::warn!("attach succeeded but reported no device node");
    } else {
        println!("{node}");
        println!("raw device: {}", node.raw_device_node());
        println!("device number: {}", node.device_number());
    }
    Ok(())
}

fn run_detach(hdiutil: &Hdiutil, args: DetachArgs) -> Result<()> {
    let mut options: Vec<Box<dyn DetachOption>> = Vec::new();
    if args.force {
        options.push(Box::new(Force(true)));
    }

    let option_refs: Vec<&dyn DetachOption> = options.iter().map(|opt| opt.as_ref()).collect();
    hdiutil.detach(&args.device, &option_refs)
}

fn run_verify(hdiutil: &Hdiutil, args: VerifyArgs) -> Result<()> {
    let mut options: Vec<Box<dyn VerifyOption>> = Vec::new();
    if args.nocache {
        options.push(Box::new(Cache(false)));
    }

    let option_refs: Vec<&dyn VerifyOption> = options.iter().map(|opt| opt.as_ref()).collect();
    hdiutil.verify(&args.image, &option_refs)?;
    println!("{}: valid", args.image);
    Ok(())
}

fn run_convert(hdiutil: &Hdiutil, args: ConvertArgs) -> Result<()> {
    let mut options: Vec<Box<dyn ConvertOption>> = Vec::new();
    if let Some(tasks) = args.tasks {
        options.push(Box::new(Tasks(tasks)));
    }

    let option_refs: Vec<&dyn ConvertOption> = options.iter().map(|opt| opt.as_ref()).collect();
    hdiutil.convert(&args.image, args.format, &args.output, &option_refs)
}

fn run_makehybrid(hdiutil: &Hdiutil, args: MakehybridArgs) -> Result<()> {
    let mut options: Vec<Box<dyn MakehybridOption>> = Vec::new();
    if args.hfs {
        options.push(Box::new(Hfs(true)));
    }
    if args.iso {
        options.push(Box::new(Iso(true)));
    }
    if args.joliet {
        options.push(Box::new(Joliet(true)));
    }
    if args.udf {
        options.push(Box::new(Udf(true)));
    }
    if let Some(name) = args.default_volume_name {
        options.push(Box::new(DefaultVolumeName(name)));
    }

    let option_refs: Vec<&dyn MakehybridOption> = options.iter().map(|opt| opt.as_ref()).collect();
    hdiutil.makehybrid(&args.image, &args.source, &option_refs)
}

//! Nearest-match selection against package layouts seen in the wild.

use tfm_core::{FrameworkIdentity, FrameworkNameProvider, FrameworkReducer, get_nearest, parse};

fn fw(token: &str) -> FrameworkIdentity {
    parse(token).unwrap_or_else(|e| panic!("failed to parse {token}: {e}"))
}

fn nearest(project: &str, candidates: &str) -> Option<String> {
    let candidates: Vec<FrameworkIdentity> = candidates.split(',').map(fw).collect();
    get_nearest(&fw(project), &candidates).map(|f| f.to_short_folder_name())
}

fn assert_nearest(project: &str, candidates: &str, expected: Option<&str>) {
    assert_eq!(
        nearest(project, candidates).as_deref(),
        expected,
        "get_nearest({project}, [{candidates}])"
    );
}

#[test]
fn test_closest_version_below_project() {
    assert_nearest("net451", "net35,net40,net45,net453", Some("net45"));
    assert_nearest("net45-client", "net40,net40-client", Some("net40-client"));
    assert_nearest("net40-client", "net40,net40-client", Some("net40-client"));
    assert_nearest("net451", "net40,nfcore45", Some("net40"));
}

#[test]
fn test_no_compatible_candidate() {
    assert_nearest("aspnetcore", "net45", None);
    assert_nearest("dotnet", "dotnet5.1,native,uap10.1", None);
    assert_nearest("uap10.0", "uap10.1,dotnet5.7,dotnet6.0,dnxcore50,native", None);
    assert_nearest("netstandard1.5", "dotnet5.6", None);
    assert_nearest("netstandardapp1.0", "dotnet5.2,dotnet", None);
}

#[test]
fn test_store_frameworks() {
    assert_nearest("win81", "native,netcore", Some("netcore"));
    assert_nearest("win81", "native,winrt45", Some("winrt45"));
    assert_nearest(
        "win81",
        "win8,netcore,nfcore,native,netcore451,winrt45",
        Some("netcore451"),
    );
    assert_nearest("uap10.0", "native,netcore,win81,net45,wpa81", Some("win81"));
    assert_nearest("uap10.0", "native,netcore,win,net45,wpa81", Some("netcore"));
    assert_nearest("uap10.0", "native,netcore,win81,net45,win", Some("win81"));
    assert_nearest("uap10.0", "native,dotnet,dnx451,dnxcore50,net45", Some("dotnet"));
    assert_nearest("uap10.0", "win8,dotnet5.3", Some("win8"));
}

#[test]
fn test_uap_generations() {
    assert_nearest(
        "uap10.0",
        "netcore50,win81,wpa81,dotnet5.4,portable-win81+net45",
        Some("netcore50"),
    );
    assert_nearest(
        "uap10.0",
        "win81,wpa81,dotnet5.4,portable-win81+net45",
        Some("win81"),
    );
    assert_nearest(
        "uap10.0",
        "dotnet5.6,dotnet5.5,dotnet5.4,portable-win81+net45",
        Some("dotnet5.5"),
    );
    assert_nearest(
        "uap10.0",
        "netstandard1.4,dotnet5.6,dotnet5.5,dotnet5.4,portable-win81+net45",
        Some("netstandard1.4"),
    );
    assert_nearest(
        "uap10.0",
        "netstandard1.5,dotnet5.6,dotnet5.5,dotnet5.4,portable-win81+net45",
        Some("dotnet5.5"),
    );
    assert_nearest("uap10.0", "dotnet,portable-win81+net45", Some("dotnet"));
    assert_nearest(
        "uap10.0",
        "dotnet6.0,portable-win81+net45+sl5,portable-win81+net45",
        Some("portable-net45+win81"),
    );
}

#[test]
fn test_net_generations() {
    assert_nearest(
        "net461",
        "net46,net45,dotnet6.0,dotnet5.5,dotnet5.4,portable-net45+win8,portable-net45+win8+wpa81",
        Some("net46"),
    );
    assert_nearest(
        "net461",
        "dotnet6.0,dotnet5.5,dotnet5.4,dotnet5.3,dotnet,portable-net45+win8,portable-net45+win8+wpa81",
        Some("dotnet5.5"),
    );
    assert_nearest(
        "net461",
        "portable-net45+win8,portable-net45+win8+wpa81",
        Some("portable-net45+win8"),
    );
    assert_nearest(
        "net461",
        "portable-net45+win8+wpa81,native",
        Some("portable-net45+win8+wpa81"),
    );
    assert_nearest("net46", "portable-net45+win8,dotnet", Some("dotnet"));
    assert_nearest("dotnet5.5", "dotnet6.0,dotnet5.4,portable-net45+win8", Some("dotnet5.4"));
    assert_nearest("dnxcore50", "dotnet6.0,dotnet5.5,portable-net45+win8", Some("dotnet5.5"));
}

#[test]
fn test_netstandard_generations() {
    assert_nearest("netstandard1.5", "net4,netstandard7.0,netstandard1.4", Some("netstandard1.4"));
    assert_nearest("netstandard1.5", "dotnet5.6,netstandard0.0", Some("netstandard"));
    assert_nearest("netstandard1.5", "dotnet5.6,netstandard0.1", Some("netstandard0.1"));
    assert_nearest(
        "netstandardapp1.5",
        "net4,netstandard1.4,netstandardapp1.3,dotnet5.6",
        Some("netstandardapp1.3"),
    );
    assert_nearest(
        "netstandardapp1.5",
        "dotnet5.6,netstandard1.3,netstandard1.2",
        Some("netstandard1.3"),
    );
}

#[test]
fn test_portable_projects() {
    assert_nearest(
        "portable-net45",
        "portable-net45+netcore45,portable-net45+netcore45+wpa81",
        Some("portable-net45+win8"),
    );
    assert_nearest(
        "portable-net45+netcore45",
        "portable-net45+netcore45+wpa81,netstandard1.1,dotnet5.1",
        Some("portable-net45+win8+wpa81"),
    );
    assert_nearest(
        "portable-net45+win81",
        "portable-net45+win8,portable-net40+win8,portable-net40+win81",
        Some("portable-net45+win8"),
    );
    assert_nearest(
        "portable-net45+win81",
        "portable-net40+win81+sl5,portable-net45+win8+sl5,portable-net45+win81+wpa81+monotouch+monoandroid",
        Some("portable-monoandroid+monotouch+net45+win81+wpa81"),
    );
}

#[test]
fn test_regular_projects_choosing_portable() {
    assert_nearest(
        "win9",
        "portable-net45+win8,portable-net45+win82,portable-net45+win81,portable-net45+win91",
        Some("portable-net45+win82"),
    );
    assert_nearest(
        "win8",
        "portable-net45+win8+wpa81,portable-net45+win8+wpa82,portable-net45+win8+wpa9,portable-net45+win8+wpa10.0,portable-net45+win8+wpa11.0+sl5",
        Some("portable-net45+win8+wpa10.0"),
    );
    // no way to rank these against each other, but the answer is stable
    assert_nearest(
        "win8",
        "portable-net45+win8+sl6,portable-net45+win8+dnxcore50,portable-net45+win8+native",
        Some("portable-dnxcore+net45+win8"),
    );
}

#[test]
fn test_duplicate_portable_profiles() {
    let project = fw("wp8");
    let candidates = [
        fw("net35"),
        fw("portable-net403%2Bsl5%2Bnetcore45%2Bwp8"),
        fw("portable-net403%2Bsl5%2Bnetcore45%2Bwp8%2BMonoAndroid1%2BMonoTouch1"),
    ];
    assert_eq!(candidates[1], candidates[2]);
    assert_eq!(get_nearest(&project, &candidates), Some(candidates[1].clone()));
}

#[test]
fn test_json_net_lib_folders() {
    let folders = "net20,net35,net40,net45,portable-net40+wp80+win8+wpa81+sl5,portable-net45+wp80+win8+wpa81+aspnetcore50";
    let store = Some("portable-aspnetcore50+net45+win8+wp8+wpa81");

    for project in ["uap10.0", "netcore50", "dnxcore50", "wp81", "win81"] {
        assert_nearest(project, folders, store);
    }
    assert_nearest("dnx452", folders, Some("net45"));
    assert_nearest("net20", folders, Some("net20"));
    assert_nearest("net451", folders, Some("net45"));
    assert_nearest("sl5", folders, Some("portable-net40+sl5+win8+wp8+wpa81"));
}

#[test]
fn test_auto_mapper_lib_folders() {
    let folders = "aspnet50,aspnetcore50,MonoAndroid,MonoTouch,net40,\
        portable-windows8%2Bnet40%2Bwp8%2Bsl5%2BMonoAndroid%2BMonoTouch,\
        portable-windows8%2Bnet40%2Bwp8%2Bwpa81%2Bsl5%2BMonoAndroid%2BMonoTouch,\
        sl5,windows81,wpa81,Xamarin.iOS10";

    for (project, expected) in [
        ("dnx451", "aspnet50"),
        ("dnx452", "aspnet50"),
        ("net45", "net40"),
        ("dnxcore5", "aspnetcore50"),
        ("win8", "portable-net40+sl5+win8+wp8"),
        ("MonoAndroid40", "monoandroid"),
        ("win81", "win81"),
        ("wpa81", "wpa81"),
        ("sl5", "sl5"),
    ] {
        assert_nearest(project, folders, Some(expected));
    }
}

#[test]
fn test_sentinel_candidates() {
    assert_nearest("net45", "unsupported,any", Some("any"));
    assert_nearest("unsupported", "any", Some("any"));
    assert_nearest("any", "any", Some("any"));
    assert_nearest("any", "dnxcore50,dotnet", Some("dnxcore"));
}

#[test]
fn test_nearest_is_a_candidate() {
    let names = FrameworkNameProvider::with_defaults();
    let reducer = FrameworkReducer::new(&names);
    let candidates: Vec<FrameworkIdentity> =
        ["net40", "net40-full", "net35"].into_iter().map(fw).collect();

    // net40 and net40-full are equal; the first spelling wins
    let chosen = reducer.get_nearest(&fw("net45"), &candidates).unwrap();
    assert_eq!(chosen, candidates[0]);
}

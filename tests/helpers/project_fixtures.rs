//! Common project file fixtures for tests.

/// Property and item, the item using the property.
pub const PROPERTY_AND_ITEM: &str = r#"<Project>
  <PropertyGroup>
    <Foo>1</Foo>
  </PropertyGroup>
  <ItemGroup>
    <Bar Include="$(Foo)" />
  </ItemGroup>
</Project>"#;

/// Same as [`PROPERTY_AND_ITEM`] with different whitespace.
pub const PROPERTY_AND_ITEM_REFORMATTED: &str = r#"<Project>

    <PropertyGroup>     <Foo>1</Foo>   </PropertyGroup>
    <ItemGroup><Bar Include="$(Foo)"/></ItemGroup>

</Project>"#;

pub const UNKNOWN_ROOT_CHILD: &str = "<Project><UnknownTag/></Project>";

pub const MISSING_IMPORT: &str = r#"<Project><Import Project="missing.props"/></Project>"#;

pub const IMPORTS_COMMON: &str = r#"<Project>
  <Import Project="common.props" />
  <PropertyGroup>
    <Own>$(Shared)</Own>
  </PropertyGroup>
</Project>"#;

pub const COMMON_PROPS: &str = r#"<Project>
  <PropertyGroup>
    <Shared>1</Shared>
    <_PrivateShared>2</_PrivateShared>
  </PropertyGroup>
  <ItemGroup>
    <Compile Include="a.cs">
      <Link>a</Link>
    </Compile>
    <_Hidden Include="b" />
  </ItemGroup>
  <Target Name="Build">
    <Csc Sources="@(Compile)" />
  </Target>
</Project>"#;

pub const SELF_IMPORT: &str = r#"<Project>
  <Import Project="self.proj" />
  <PropertyGroup><SelfProp>1</SelfProp></PropertyGroup>
</Project>"#;

pub const CYCLE_A: &str = r#"<Project>
  <Import Project="b.props" />
  <PropertyGroup><FromA>1</FromA></PropertyGroup>
  <ItemGroup><Shared Include="a"><FromA>1</FromA></Shared></ItemGroup>
</Project>"#;

pub const CYCLE_B: &str = r#"<Project>
  <Import Project="a.props" />
  <PropertyGroup><FromB>1</FromB></PropertyGroup>
  <ItemGroup><Shared Include="b"><FromB>1</FromB></Shared></ItemGroup>
</Project>"#;
